use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRfpStore, InMemoryVendorDirectory};
use crate::routes::with_procurement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use procurement::config::AppConfig;
use procurement::error::AppError;
use procurement::telemetry;
use procurement::workflows::proposals::ProcurementService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(ProcurementService::new(
        Arc::new(InMemoryRfpStore::default()),
        Arc::new(InMemoryVendorDirectory::default()),
        config.scoring.clone(),
    ));

    let reference_price = service.scorer().config().reference_price;
    let app = with_procurement_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = ?config.environment,
        %addr,
        reference_price,
        "procurement service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

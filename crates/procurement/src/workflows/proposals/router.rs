use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::domain::{ProposalSubmission, RfpDraft, RfpId, VendorDraft, VendorId, VendorUpdate};
use super::repository::{RepositoryError, RfpRepository, VendorDirectory};
use super::scoring::ComparisonRequest;
use super::service::{ProcurementService, ProcurementServiceError, RfpComparison};

/// Router builder exposing RFP, vendor, proposal, and comparison endpoints.
pub fn procurement_router<R, V>(service: Arc<ProcurementService<R, V>>) -> Router
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    Router::new()
        .route(
            "/api/rfps",
            post(create_rfp_handler::<R, V>).get(list_rfps_handler::<R, V>),
        )
        .route(
            "/api/rfps/:rfp_id/compare",
            post(compare_rfp_handler::<R, V>),
        )
        .route(
            "/api/vendors",
            post(register_vendor_handler::<R, V>).get(list_vendors_handler::<R, V>),
        )
        .route(
            "/api/vendors/:vendor_id",
            get(vendor_handler::<R, V>)
                .put(update_vendor_handler::<R, V>)
                .delete(delete_vendor_handler::<R, V>),
        )
        .route(
            "/api/proposals",
            post(record_proposal_handler::<R, V>).get(list_proposals_handler::<R, V>),
        )
        .route(
            "/api/proposals/rfp/:rfp_id",
            get(rfp_proposals_handler::<R, V>),
        )
        .route(
            "/api/proposals/compare/:rfp_id",
            get(comparison_envelope_handler::<R, V>),
        )
        .route("/api/compare", post(score_offers_handler::<R, V>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonEnvelope {
    message: &'static str,
    #[serde(flatten)]
    result: RfpComparison,
}

pub(crate) async fn create_rfp_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Json(draft): Json<RfpDraft>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.create_rfp(draft) {
        Ok(rfp) => (
            StatusCode::CREATED,
            Json(json!({ "message": "RFP created successfully", "rfp": rfp })),
        )
            .into_response(),
        Err(err) => error_response(error_status(&err), "Failed to create RFP", &err),
    }
}

pub(crate) async fn list_rfps_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.list_rfps() {
        Ok(rfps) => (StatusCode::OK, Json(rfps)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to fetch RFPs", &err),
    }
}

/// Returns the bare comparison report; an RFP without proposals is a bad request.
pub(crate) async fn compare_rfp_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.compare(&RfpId(rfp_id)) {
        Ok(result) => (StatusCode::OK, Json(result.comparison)).into_response(),
        Err(err) => {
            let status = match &err {
                ProcurementServiceError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
                other => error_status(other),
            };
            error_response(status, "Failed to compare proposals", &err)
        }
    }
}

/// Returns the comparison wrapped with RFP details; missing proposals are a 404.
pub(crate) async fn comparison_envelope_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.compare(&RfpId(rfp_id)) {
        Ok(result) => (
            StatusCode::OK,
            Json(ComparisonEnvelope {
                message: "Proposal comparison completed",
                result,
            }),
        )
            .into_response(),
        Err(err) => {
            let status = match &err {
                ProcurementServiceError::NoProposals(_) => StatusCode::NOT_FOUND,
                ProcurementServiceError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
                other => error_status(other),
            };
            error_response(status, "Failed to compare proposals", &err)
        }
    }
}

pub(crate) async fn register_vendor_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Json(draft): Json<VendorDraft>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.register_vendor(draft) {
        Ok(vendor) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Vendor created successfully", "vendor": vendor })),
        )
            .into_response(),
        Err(err) => error_response(error_status(&err), "Failed to create vendor", &err),
    }
}

pub(crate) async fn list_vendors_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.list_vendors() {
        Ok(vendors) => (StatusCode::OK, Json(vendors)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to fetch vendors", &err),
    }
}

pub(crate) async fn vendor_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(vendor_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.get_vendor(&VendorId(vendor_id)) {
        Ok(vendor) => (StatusCode::OK, Json(vendor)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to fetch vendor", &err),
    }
}

pub(crate) async fn update_vendor_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(vendor_id): Path<String>,
    Json(update): Json<VendorUpdate>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.update_vendor(&VendorId(vendor_id), update) {
        Ok(vendor) => (
            StatusCode::OK,
            Json(json!({ "message": "Vendor updated successfully", "vendor": vendor })),
        )
            .into_response(),
        Err(err) => error_response(error_status(&err), "Failed to update vendor", &err),
    }
}

pub(crate) async fn delete_vendor_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(vendor_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.delete_vendor(&VendorId(vendor_id)) {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Vendor deleted successfully" })),
        )
            .into_response(),
        Err(err) => error_response(error_status(&err), "Failed to delete vendor", &err),
    }
}

pub(crate) async fn record_proposal_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Json(submission): Json<ProposalSubmission>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.record_proposal(submission) {
        Ok(proposal) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Proposal recorded", "proposal": proposal })),
        )
            .into_response(),
        Err(err) => error_response(error_status(&err), "Failed to record proposal", &err),
    }
}

pub(crate) async fn list_proposals_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.list_proposals() {
        Ok(proposals) => (StatusCode::OK, Json(proposals)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to fetch proposals", &err),
    }
}

pub(crate) async fn rfp_proposals_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    match service.proposals_for_rfp(&RfpId(rfp_id)) {
        Ok(proposals) => (StatusCode::OK, Json(proposals)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to fetch proposals", &err),
    }
}

/// Stateless scoring of caller-supplied offers.
pub(crate) async fn score_offers_handler<R, V>(
    State(service): State<Arc<ProcurementService<R, V>>>,
    Json(request): Json<ComparisonRequest>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    let (requirement, offers) = request.into_parts();
    match service.compare_offers(&requirement, &offers) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(error_status(&err), "Failed to compare proposals", &err),
    }
}

fn error_status(err: &ProcurementServiceError) -> StatusCode {
    match err {
        ProcurementServiceError::RfpNotFound(_)
        | ProcurementServiceError::VendorNotFound(_)
        | ProcurementServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProcurementServiceError::NoProposals(_)
        | ProcurementServiceError::DuplicateVendor { .. }
        | ProcurementServiceError::Validation(_)
        | ProcurementServiceError::Scoring(_) => StatusCode::BAD_REQUEST,
        ProcurementServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ProcurementServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(status: StatusCode, message: &str, err: &ProcurementServiceError) -> Response {
    if status.is_server_error() {
        error!(error = %err, "{message}");
    }
    let payload = json!({
        "message": message,
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::workflows::proposals::ScoringConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Only production changes runtime behavior (log targets on, colors off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl AppEnvironment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Procurement service settings read from `APP_*` variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or_default();

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            reference_price: positive_or("APP_SCORING_REFERENCE_PRICE", defaults.reference_price)?,
            delivery_decay_per_day: positive_or(
                "APP_SCORING_DELIVERY_DECAY",
                defaults.delivery_decay_per_day,
            )?,
            warranty_points_per_month: positive_or(
                "APP_SCORING_WARRANTY_POINTS",
                defaults.warranty_points_per_month,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host: var_or("APP_HOST", DEFAULT_HOST),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: var_or("APP_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            },
            scoring,
        })
    }
}

fn var_or(variable: &str, default: &str) -> String {
    env::var(variable).unwrap_or_else(|_| default.to_string())
}

fn positive_or(variable: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(variable) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or(ConfigError::InvalidScoring { variable, raw })
}

/// HTTP bind settings; `--host`/`--port` may replace them after loading.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number (got '{raw}')")]
    InvalidPort { raw: String },
    #[error("host '{host}' is neither localhost nor an IP address")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{variable} must be a positive number (got '{raw}')")]
    InvalidScoring { variable: &'static str, raw: String },
}

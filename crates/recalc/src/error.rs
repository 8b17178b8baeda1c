use crate::config::ConfigError;
use crate::scholarship::CatalogError;
use crate::telemetry::TelemetryError;

/// Startup and CLI failures; request-level failures are reported by the routers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference data error: {0}")]
    Catalog(#[from] CatalogError),
}

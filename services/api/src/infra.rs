use crate::cli::CatalogArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use recalc::access::DomainAllowlist;
use recalc::config::CatalogConfig;
use recalc::error::AppError;
use recalc::scholarship::{Catalog, ScholarshipService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) allowlist: Arc<DomainAllowlist>,
}

/// Apply CLI overrides on top of the configured reference data paths.
pub(crate) fn resolve_catalog_paths(config: &CatalogConfig, overrides: CatalogArgs) -> CatalogConfig {
    CatalogConfig {
        rules_path: overrides
            .rules
            .unwrap_or_else(|| config.rules_path.clone()),
        campus_meta_path: overrides
            .campus_meta
            .unwrap_or_else(|| config.campus_meta_path.clone()),
    }
}

pub(crate) fn load_service(paths: &CatalogConfig) -> Result<Arc<ScholarshipService>, AppError> {
    let catalog = Catalog::load(&paths.rules_path, &paths.campus_meta_path)?;
    Ok(Arc::new(ScholarshipService::new(Arc::new(catalog))))
}

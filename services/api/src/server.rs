use crate::cli::{CatalogArgs, ServeArgs};
use crate::infra::{load_service, resolve_catalog_paths, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recalc::access::DomainAllowlist;
use recalc::config::AppConfig;
use recalc::error::AppError;
use recalc::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let allowlist = DomainAllowlist::new(config.access.allowed_domains.clone());
    if allowlist.is_empty() {
        warn!("RECALC_ALLOWED_DOMAINS is empty; access checks allow every address");
    }

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        allowlist: Arc::new(allowlist),
    };

    let paths = resolve_catalog_paths(&config.catalog, catalog_args);
    let service = load_service(&paths)?;

    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship calculator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use recalc::scholarship::{scholarship_router, ScholarshipService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct AccessCheckRequest {
    pub(crate) email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct AccessCheckResponse {
    pub(crate) allowed: bool,
}

pub(crate) fn with_operational_routes(service: Arc<ScholarshipService>) -> Router {
    scholarship_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/access/check", post(access_check_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// An empty allowlist leaves the calculator open.
pub(crate) async fn access_check_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AccessCheckRequest>,
) -> Json<AccessCheckResponse> {
    let allowed = state.allowlist.is_empty() || state.allowlist.permits_email(&payload.email);
    debug!(allowed, "access check");
    Json(AccessCheckResponse { allowed })
}

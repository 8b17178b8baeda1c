use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::calculator::CalculationError;
use super::domain::{Level, Modality};
use super::selection::Selection;
use super::service::ScholarshipService;

/// Router builder exposing the calculation API.
pub fn scholarship_router(service: Arc<ScholarshipService>) -> Router {
    Router::new()
        .route("/api/v1/scholarship/calculate", post(calculate_handler))
        .route("/api/v1/scholarship/list-price", post(list_price_handler))
        .route("/api/v1/scholarship/options", get(options_handler))
        .route(
            "/api/v1/scholarship/campuses/:campus/extras",
            get(campus_extras_handler),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OptionsQuery {
    #[serde(default)]
    level: Option<Level>,
    #[serde(default)]
    modality: Option<Modality>,
    #[serde(default)]
    campus: Option<String>,
}

pub(crate) async fn calculate_handler(
    State(service): State<Arc<ScholarshipService>>,
    axum::Json(selection): axum::Json<Selection>,
) -> Response {
    match service.calculate(&selection) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => rejection(&error),
    }
}

pub(crate) async fn list_price_handler(
    State(service): State<Arc<ScholarshipService>>,
    axum::Json(selection): axum::Json<Selection>,
) -> Response {
    let payload = json!({ "list_price": service.list_price(&selection) });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn options_handler(
    State(service): State<Arc<ScholarshipService>>,
    Query(query): Query<OptionsQuery>,
) -> Response {
    let options = service.options(query.level, query.modality, query.campus.as_deref());
    (StatusCode::OK, axum::Json(options)).into_response()
}

pub(crate) async fn campus_extras_handler(
    State(service): State<Arc<ScholarshipService>>,
    Path(campus): Path<String>,
) -> Response {
    match service.campus_extras(&campus) {
        Some(categories) => {
            let payload = json!({
                "campus": campus,
                "categories": categories,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => {
            let payload = json!({
                "error": format!("campus '{campus}' lists no extra charges"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn rejection(error: &CalculationError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

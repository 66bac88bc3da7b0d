//! System handlers: usage, health, OpenAPI.

use crate::api::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

/// Plain-text usage served at `/` and for unknown paths
pub const USAGE: &str = "Send a GET request to /numbers\n";

/// GET / - Usage information
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Usage text", body = String, content_type = "text/plain")
    )
)]
pub async fn usage() -> &'static str {
    USAGE
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy, with the per-request fetch budget")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "max_timeout_ms": state.config.fetch.max_timeout.as_millis() as u64
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

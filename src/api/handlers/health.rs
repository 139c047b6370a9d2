//! Health check endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// Reports service health.
///
/// # Endpoint
///
/// `GET /health`
///
/// Probes the database with a trivial query. Returns 200 when storage is
/// reachable, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.link_service.ping_storage().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

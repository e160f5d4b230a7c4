//! Health check handler.

use axum::Json;

use crate::server::types::HealthResponse;

/// Liveness endpoint with the running version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

//! Liveness handler.

use axum::Json;

use crate::dto::response::HealthResponse;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "drivebox".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

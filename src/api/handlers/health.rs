//! Liveness endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// `GET /healthz`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

//! Liveness probe.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /api/health` — always ok; does not look at the chat service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Chatbot API is running",
    })
}

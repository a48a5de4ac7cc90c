// src/api/http/handlers.rs

use axum::Json;
use chrono::Utc;

use crate::api::types::HealthResponse;

/// Liveness check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

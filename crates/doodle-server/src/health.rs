use std::sync::Arc;

use axum::{Json, extract::State};
use doodle_config::HealthConfig;
use serde::Serialize;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: String,
    service: String,
}

/// Health check handler
pub async fn health_handler(State(config): State<Arc<HealthConfig>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: config.message.clone(),
        service: config.service.clone(),
    })
}

//! Health check handler

use axum::{extract::State, Json};
use performance_core::constants::ENGINE_VERSION;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    engine_version: &'static str,
    timestamp: i64,
    model_loaded: bool,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        engine_version: ENGINE_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
        model_loaded: state.registry.is_loaded(),
    })
}

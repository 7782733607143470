//! Prediction handler

use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde_json::Value;

use crate::models::PredictResponse;
use crate::{AppResult, AppState};

/// Validate the body, run the engine off the async runtime and shape the
/// result. Invalid bodies are rejected before the model is touched.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(body) = payload?;
    let registry = Arc::clone(&state.registry);

    let result = tokio::task::spawn_blocking(move || registry.predict_input(&body)).await??;

    tracing::debug!(
        score = result.adjusted_score,
        classification = %result.classification,
        risk = %result.risk_level,
        "prediction served"
    );

    Ok(Json(PredictResponse::from(result)))
}

//! Model status and reload handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use performance_core::ModelStatus;

use crate::{AppResult, AppState};

pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.registry.status())
}

/// Reload artifacts from disk; the previous model keeps serving on failure.
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<ModelStatus>> {
    let registry = Arc::clone(&state.registry);
    let status = tokio::task::spawn_blocking(move || registry.reload()).await??;

    tracing::info!(estimator = %status.estimator, sha256 = ?status.sha256, "model reloaded");
    Ok(Json(status))
}

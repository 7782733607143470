//! Student Performance Server
//!
//! HTTP front end for the prediction engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  PERFORMANCE SERVER                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   spawn_blocking   ┌───────────────────┐  │
//! │  │  API      │ ─────────────────► │  performance_core │  │
//! │  │  (Axum)   │                    │  validate → score │  │
//! │  └───────────┘                    └─────────┬─────────┘  │
//! │                                             ▼            │
//! │                                   ┌───────────────────┐  │
//! │                                   │  ModelRegistry    │  │
//! │                                   │  (ONNX / scaler)  │  │
//! │                                   └───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use performance_core::constants::APP_NAME;
use performance_core::ModelRegistry;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "performance_server=debug,performance_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    init_tracing(config.log_json);

    tracing::info!("{} server starting...", APP_NAME);
    tracing::info!(
        estimator = %config.estimator,
        model = %config.model_path.display(),
        "Model configuration"
    );

    let registry = Arc::new(ModelRegistry::new(config.estimator, config.model_paths()));

    // Warm up; a failure here is retried by the first request
    let warmup = Arc::clone(&registry);
    match tokio::task::spawn_blocking(move || warmup.get_or_load()).await? {
        Ok(model) => tracing::info!(estimator = model.estimator.name(), "Model loaded"),
        Err(e) => tracing::warn!("Model not loaded at startup: {}", e),
    }

    // Build application state
    let state = AppState {
        registry,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(handlers::health::check))
        // Prediction (trailing-slash form kept for existing clients)
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/predict/", post(handlers::predict::predict))
        .route("/api/v1/predict", post(handlers::predict::predict))
        // Model management
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/model/reload", post(handlers::model::reload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

//! Router tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use performance_core::{
    ConstantEstimator, EstimatorKind, LoadedModel, ModelPaths, ModelRegistry,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

fn app_with(registry: ModelRegistry) -> Router {
    create_router(AppState {
        registry: Arc::new(registry),
        config: Config::default(),
    })
}

fn constant_app(raw: f64) -> (Router, Arc<ConstantEstimator>) {
    let estimator = Arc::new(ConstantEstimator::new(raw));
    let registry = ModelRegistry::with_model(LoadedModel::new(estimator.clone(), None));
    (app_with(registry), estimator)
}

fn missing_artifacts() -> (ModelRegistry, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths {
        model: dir.path().join("model.onnx"),
        scaler: dir.path().join("scaler.json"),
        metadata: dir.path().join("model.json"),
    };
    (ModelRegistry::new(EstimatorKind::Onnx, paths), dir)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

fn post_raw(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = tokio_test::assert_ok!(app.oneshot(request).await);
    let status = response.status();
    let bytes = tokio_test::assert_ok!(axum::body::to_bytes(response.into_body(), usize::MAX).await);
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        tokio_test::assert_ok!(serde_json::from_slice(&bytes))
    };
    (status, body)
}

fn balanced() -> Value {
    json!({
        "hours_studied": 7,
        "previous_scores": 85,
        "extracurricular": true,
        "sleep_hours": 8,
        "sample_papers": 6,
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _) = constant_app(50.0);
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_health_without_model() {
    let (registry, _dir) = missing_artifacts();
    let (status, body) = send(app_with(registry), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_predict_success_shape() {
    let (app, estimator) = constant_app(90.0);
    let (status, body) = send(app, post_json("/api/predict", &balanced())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_performance_index"], 90.0);
    assert_eq!(body["student_classification"], "High Performer");
    assert!(body["description"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(body["risk_level"], "Low");
    assert_eq!(body["performance_gap"], 5.0);
    assert!(body["analysis"]["warnings"].as_array().is_some_and(|w| w.is_empty()));
    assert!(body["analysis"]["recommendations"].is_array());
    assert!(body.get("input_warnings").is_none());
    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_predict_route_aliases() {
    for uri in ["/api/predict/", "/api/v1/predict"] {
        let (app, _) = constant_app(90.0);
        let (status, body) = send(app, post_json(uri, &balanced())).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["student_classification"], "High Performer");
    }
}

#[tokio::test]
async fn test_critical_scenario() {
    let (app, _) = constant_app(80.0);
    let body = json!({
        "hours_studied": 14,
        "previous_scores": 75,
        "extracurricular": false,
        "sleep_hours": 3,
        "sample_papers": 10,
    });
    let (status, body) = send(app, post_json("/api/predict", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_performance_index"], 4.8);
    assert_eq!(body["student_classification"], "Sleep Deprived - Critical");
    assert_eq!(body["risk_level"], "Critical");
    assert_eq!(body["performance_gap"], -70.2);
    // burnout combination and very low sleep
    assert_eq!(body["input_warnings"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_out_of_range_rejected_without_inference() {
    let (app, estimator) = constant_app(50.0);
    let mut body = balanced();
    body["sleep_hours"] = json!(25);

    let (status, body) = send(app, post_json("/api/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": { "sleep_hours": "Must be 0-24" } }));
    assert_eq!(estimator.calls(), 0);
}

#[tokio::test]
async fn test_missing_and_mistyped_fields() {
    let (app, _) = constant_app(50.0);
    let body = json!({
        "hours_studied": "five",
        "previous_scores": 60,
        "extracurricular": "yes",
        "sleep_hours": 8,
    });
    let (status, body) = send(app, post_json("/api/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["hours_studied"], "Must be an integer.");
    assert_eq!(body["errors"]["extracurricular"], "Must be a boolean.");
    assert_eq!(body["errors"]["sample_papers"], "This field is required.");
}

#[tokio::test]
async fn test_non_object_body() {
    let (app, _) = constant_app(50.0);
    let (status, body) = send(app, post_json("/api/predict", &json!([1, 2, 3]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["non_field_errors"], "Expected a JSON object.");
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, estimator) = constant_app(50.0);
    let (status, body) = send(app, post_raw("/api/predict", "{\"hours_studied\": ".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["non_field_errors"].is_string());
    assert_eq!(estimator.calls(), 0);
}

#[tokio::test]
async fn test_missing_artifact_is_server_error() {
    let (registry, _dir) = missing_artifacts();
    let (status, body) = send(app_with(registry), post_json("/api/predict", &balanced())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("Model not found")));
}

#[tokio::test]
async fn test_validation_precedes_model_load() {
    let (registry, _dir) = missing_artifacts();
    let mut body = balanced();
    body["previous_scores"] = json!(101);

    let (status, body) = send(app_with(registry), post_json("/api/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["previous_scores"], "Must be 0-100");
}

#[tokio::test]
async fn test_model_status() {
    let (app, _) = constant_app(50.0);
    let (status, body) = send(app, get("/api/v1/model")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["estimator"], "constant");
    assert_eq!(body["feature_version"], 1);
    assert_eq!(body["feature_names"].as_array().map(Vec::len), Some(14));
}

#[tokio::test]
async fn test_inference_count_tracked() {
    let estimator = Arc::new(ConstantEstimator::new(70.0));
    let registry = Arc::new(ModelRegistry::with_model(LoadedModel::new(estimator, None)));
    let app = create_router(AppState {
        registry: Arc::clone(&registry),
        config: Config::default(),
    });

    for _ in 0..3 {
        let (status, _) = send(app.clone(), post_json("/api/predict", &balanced())).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(registry.status().inference_count, 3);
}

#[tokio::test]
async fn test_reload_heuristic() {
    let registry = ModelRegistry::new(EstimatorKind::Heuristic, ModelPaths::default());
    let (status, body) = send(app_with(registry), post_raw("/api/v1/model/reload", String::new())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["estimator"], "heuristic");
}

#[tokio::test]
async fn test_reload_failure() {
    let (registry, _dir) = missing_artifacts();
    let (status, body) = send(app_with(registry), post_raw("/api/v1/model/reload", String::new())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

//! Model Module - Estimator adapters and registry
//!
//! The estimator is an opaque `predict(features) -> f64`. Everything the
//! engine knows about it goes through the traits in `estimator`, so the
//! ONNX adapter, the heuristic and test doubles are interchangeable.

pub mod estimator;
pub mod inference;
pub mod scaler;
pub mod heuristic;
pub mod registry;

// Re-export common types
pub use estimator::{ConstantEstimator, Estimator, FeatureScaler};
pub use inference::OnnxEstimator;
pub use scaler::StandardScaler;
pub use heuristic::HeuristicEstimator;
pub use registry::{
    EstimatorKind, InferenceStats, LoadedModel, ModelMetadata, ModelPaths, ModelRegistry,
    ModelStatus,
};

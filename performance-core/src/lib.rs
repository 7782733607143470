//! Student Performance Engine - Core Library
//!
//! Predicts a bounded performance index (0-100) from five observed study
//! habits, corrects the raw model output with an ordered cascade of
//! plausibility rules and classifies the result.
//!
//! # Pipeline
//!
//! ```text
//! raw JSON ─► validation ─► features ─► (scaler) ─► estimator
//!                                                      │
//!            result ◄─ classification ◄─ constraints ◄─┘
//! ```
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use performance_core::{validate_input, ConstantEstimator, Predictor};
//!
//! let validated = validate_input(&body).into_result()?;
//! let predictor = Predictor::new(Arc::new(ConstantEstimator::new(72.0)));
//! let result = predictor.predict(&validated.profile)?;
//! println!("{} ({})", result.classification, result.risk_level);
//! ```

pub mod constants;
pub mod logic;

pub use logic::error::{EngineError, EngineResult, FieldErrors};
pub use logic::profile::StudentProfile;
pub use logic::validation::{validate_input, ValidatedProfile, ValidationOutcome};
pub use logic::features::{engineer_features, FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::constraints::{correct, Correction, PreparationTier};
pub use logic::classification::{classify, ClassificationResult, RiskLevel, StudentClass};
pub use logic::model::{
    ConstantEstimator, Estimator, EstimatorKind, FeatureScaler, HeuristicEstimator, LoadedModel,
    ModelPaths, ModelRegistry, ModelStatus, OnnxEstimator, StandardScaler,
};
pub use logic::pipeline::{round2, PredictionResult, Predictor};

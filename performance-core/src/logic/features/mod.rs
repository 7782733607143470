//! Features Module - Feature Engineering
//!
//! Turns a validated `StudentProfile` into the fixed-order vector the
//! estimator was trained on. Order and scale are a contract with the model.

pub mod layout;
pub mod vector;
pub mod engineer;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, layout_hash};
pub use vector::FeatureVector;
pub use engineer::{engineer_features, sleep_quality, cognitive_capacity};

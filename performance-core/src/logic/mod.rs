//! Logic Module - Prediction Engine
//!
//! ## Components (leaves first)
//! - `validation/` - Input shape/range checks and advisory warnings
//! - `features/` - Fixed-order feature engineering
//! - `model/` - Estimator adapters (ONNX, heuristic) and model registry
//! - `constraints/` - Plausibility correction cascade
//! - `classification/` - Label, risk tier, warnings and recommendations
//! - `pipeline` - Composes the above for a single profile

pub mod error;
pub mod profile;
pub mod rules;

pub mod validation;
pub mod features;
pub mod model;
pub mod constraints;
pub mod classification;
pub mod pipeline;

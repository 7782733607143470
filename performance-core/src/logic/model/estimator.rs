//! Estimator traits
//!
//! Implementations must be thread-safe: one instance is shared by every
//! request behind an `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::logic::error::EngineResult;
use crate::logic::features::FeatureVector;

/// Opaque trained regressor
pub trait Estimator: Send + Sync {
    /// Short identifier for logs and status ("onnx", "heuristic", ...)
    fn name(&self) -> &'static str;

    /// Raw, uncorrected prediction for one feature vector.
    fn predict(&self, features: &FeatureVector) -> EngineResult<f64>;
}

/// Preprocessing fitted together with the estimator
pub trait FeatureScaler: Send + Sync {
    fn scale(&self, features: &FeatureVector) -> FeatureVector;
}

/// Returns a fixed value and counts calls.
#[derive(Debug, Default)]
pub struct ConstantEstimator {
    value: f64,
    calls: AtomicU64,
}

impl ConstantEstimator {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Estimator for ConstantEstimator {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn predict(&self, _features: &FeatureVector) -> EngineResult<f64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.value)
    }
}

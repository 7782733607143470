//! Standard Scaler - z-score normalization fitted at training time
//!
//! Sidecar format (`scaler.json`):
//! ```json
//! { "mean": [14 floats], "scale": [14 floats], "feature_columns": [14 names] }
//! ```
//! `feature_columns` is optional; when present it must match the compiled
//! feature layout exactly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
use super::estimator::FeatureScaler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_columns: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
            feature_columns: None,
        }
    }

    /// Identity transform
    pub fn identity() -> Self {
        Self::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT])
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let scaler: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::ModelUnavailable(format!("Invalid scaler: {}", e)))?;
        scaler.check()?;
        Ok(scaler)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        log::info!("Loading scaler from: {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ModelUnavailable(format!("Failed to read scaler {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Reject parameters that do not fit the compiled layout.
    pub fn check(&self) -> EngineResult<()> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(EngineError::ModelUnavailable(format!(
                "Scaler expects {} features, got mean={} scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            )));
        }

        if self.mean.iter().chain(self.scale.iter()).any(|v| !v.is_finite()) {
            return Err(EngineError::ModelUnavailable(
                "Scaler contains non-finite parameters".to_string(),
            ));
        }

        if let Some(columns) = &self.feature_columns {
            if !columns.iter().map(String::as_str).eq(FEATURE_LAYOUT.iter().copied()) {
                return Err(EngineError::ModelUnavailable(
                    "Scaler feature columns do not match the feature layout".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn scale(&self, features: &FeatureVector) -> FeatureVector {
        features.map_indexed(|i, value| {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let scale = match self.scale.get(i).copied() {
                Some(s) if s != 0.0 => s,
                _ => 1.0,
            };
            (value - mean) / scale
        })
    }
}

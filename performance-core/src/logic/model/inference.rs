//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported regressor and runs it on one feature vector.
//! Expected graph: a single float32 input of shape [1, FEATURE_COUNT]; the
//! first output holds the prediction.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::estimator::Estimator;

/// ONNX-backed estimator
///
/// `Session::run` needs `&mut`, so the session sits behind a mutex; requests
/// serialize on inference only.
pub struct OnnxEstimator {
    session: Mutex<Session>,
    output_name: String,
    source: PathBuf,
}

impl std::fmt::Debug for OnnxEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEstimator")
            .field("output_name", &self.output_name)
            .field("source", &self.source)
            .finish()
    }
}

impl OnnxEstimator {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> EngineResult<Self> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(EngineError::ModelUnavailable(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| unavailable(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| unavailable(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| unavailable(format!("Failed to load model: {}", e)))?;

        let estimator = Self::from_session(session, model_path.to_path_buf())?;
        log::info!("ONNX model loaded successfully (output: {})", estimator.output_name);
        Ok(estimator)
    }

    fn from_session(session: Session, source: PathBuf) -> EngineResult<Self> {
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| unavailable("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            source,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Estimator for OnnxEstimator {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn predict(&self, features: &FeatureVector) -> EngineResult<f64> {
        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            features.to_f32().to_vec(),
        ).map_err(|e| failed(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| failed(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| failed(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| failed("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| failed(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;

        data.first()
            .map(|value| *value as f64)
            .ok_or_else(|| failed("Empty output tensor".to_string()))
    }
}

// ============================================================================
// ERROR HELPERS
// ============================================================================

fn unavailable(message: String) -> EngineError {
    EngineError::ModelUnavailable(message)
}

fn failed(message: String) -> EngineError {
    EngineError::Inference(message)
}

//! Model Registry
//!
//! Process-wide holder of the loaded estimator and scaler.
//!
//! - Lazy: the first request loads the artifacts (double-checked).
//! - Failed loads are not cached; the next request tries again.
//! - `reload` builds the new model outside the lock, then swaps. In-flight
//!   requests keep the `Arc` they already cloned.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{DEFAULT_METADATA_PATH, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{layout::validate_layout, LayoutInfo, FEATURE_COUNT};
use super::estimator::{Estimator, FeatureScaler};
use super::heuristic::HeuristicEstimator;
use super::inference::OnnxEstimator;
use super::scaler::StandardScaler;

// ============================================================================
// ESTIMATOR KIND
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    #[default]
    Onnx,
    Heuristic,
}

impl EstimatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorKind::Onnx => "onnx",
            EstimatorKind::Heuristic => "heuristic",
        }
    }
}

impl FromStr for EstimatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onnx" => Ok(EstimatorKind::Onnx),
            "heuristic" => Ok(EstimatorKind::Heuristic),
            other => Err(format!("unknown estimator '{}', expected onnx or heuristic", other)),
        }
    }
}

impl std::fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ARTIFACTS
// ============================================================================

/// Artifact locations. Scaler and metadata files are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub metadata: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler: PathBuf::from(DEFAULT_SCALER_PATH),
            metadata: PathBuf::from(DEFAULT_METADATA_PATH),
        }
    }
}

/// Layout the artifact was exported with (`model.json`)
#[derive(Debug, Clone, Deserialize)]
struct ArtifactLayout {
    feature_version: u8,
    layout_hash: u32,
    #[serde(default)]
    feature_count: Option<usize>,
}

fn check_artifact_layout(path: &Path) -> EngineResult<()> {
    if !path.exists() {
        log::warn!("No model metadata at {}, skipping layout check", path.display());
        return Ok(());
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        EngineError::ModelUnavailable(format!("Failed to read metadata {}: {}", path.display(), e))
    })?;
    let layout: ArtifactLayout = serde_json::from_str(&json)
        .map_err(|e| EngineError::ModelUnavailable(format!("Invalid model metadata: {}", e)))?;

    if let Some(count) = layout.feature_count {
        if count != FEATURE_COUNT {
            return Err(EngineError::ModelUnavailable(format!(
                "Model expects {} features, engine produces {}",
                count, FEATURE_COUNT
            )));
        }
    }

    validate_layout(layout.feature_version, layout.layout_hash)
        .map_err(|e| EngineError::ModelUnavailable(e.to_string()))?;

    log::info!("Model layout verified (v{}, {:08x})", layout.feature_version, layout.layout_hash);
    Ok(())
}

fn sha256_file(path: &Path) -> EngineResult<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        EngineError::ModelUnavailable(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

// ============================================================================
// LOADED MODEL
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub estimator: String,
    pub model_path: Option<String>,
    pub sha256: Option<String>,
    pub scaler_path: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Estimator plus the preprocessing it was trained with
#[derive(Clone)]
pub struct LoadedModel {
    pub estimator: Arc<dyn Estimator>,
    pub scaler: Option<Arc<dyn FeatureScaler>>,
    pub metadata: ModelMetadata,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("estimator", &self.estimator.name())
            .field("scaled", &self.scaler.is_some())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl LoadedModel {
    /// Wrap an in-memory estimator (tests, embedding).
    pub fn new(estimator: Arc<dyn Estimator>, scaler: Option<Arc<dyn FeatureScaler>>) -> Self {
        let metadata = ModelMetadata {
            estimator: estimator.name().to_string(),
            model_path: None,
            sha256: None,
            scaler_path: None,
            loaded_at: Utc::now(),
        };
        Self { estimator, scaler, metadata }
    }

    /// Load artifacts for `kind`.
    ///
    /// ONNX order: model file present, layout metadata, scaler, session.
    /// Every failure is `ModelUnavailable`.
    pub fn load(kind: EstimatorKind, paths: &ModelPaths) -> EngineResult<Self> {
        match kind {
            EstimatorKind::Heuristic => {
                log::info!("Using heuristic estimator");
                Ok(Self::new(Arc::new(HeuristicEstimator::new()), None))
            }
            EstimatorKind::Onnx => Self::load_onnx(paths),
        }
    }

    fn load_onnx(paths: &ModelPaths) -> EngineResult<Self> {
        if !paths.model.exists() {
            return Err(EngineError::ModelUnavailable(format!(
                "Model not found: {}",
                paths.model.display()
            )));
        }

        check_artifact_layout(&paths.metadata)?;

        let scaler: Option<Arc<dyn FeatureScaler>> = if paths.scaler.exists() {
            Some(Arc::new(StandardScaler::load(&paths.scaler)?))
        } else {
            log::warn!("No scaler at {}, features are passed unscaled", paths.scaler.display());
            None
        };

        let sha256 = sha256_file(&paths.model)?;
        let estimator = OnnxEstimator::load(&paths.model)?;

        log::info!("Model ready: {} (sha256 {})", paths.model.display(), &sha256[..12]);

        Ok(Self {
            metadata: ModelMetadata {
                estimator: estimator.name().to_string(),
                model_path: Some(paths.model.display().to_string()),
                sha256: Some(sha256),
                scaler_path: scaler.as_ref().map(|_| paths.scaler.display().to_string()),
                loaded_at: Utc::now(),
            },
            estimator: Arc::new(estimator),
            scaler,
        })
    }
}

// ============================================================================
// INFERENCE STATS
// ============================================================================

/// Latency stats
#[derive(Debug, Default)]
pub struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

impl InferenceStats {
    pub fn record(&self, elapsed: Duration) {
        self.latency_sum_us.fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f64 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.count();
        if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 }
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Model status for the API
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub estimator: String,
    pub model_path: Option<String>,
    pub sha256: Option<String>,
    pub scaler_path: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub feature_version: u8,
    pub layout_hash: String,
    pub feature_names: Vec<String>,
    pub inference_count: u64,
    pub avg_latency_ms: f64,
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct ModelRegistry {
    kind: EstimatorKind,
    paths: ModelPaths,
    slot: RwLock<Option<Arc<LoadedModel>>>,
    stats: InferenceStats,
}

impl ModelRegistry {
    /// Empty registry; artifacts load on first use.
    pub fn new(kind: EstimatorKind, paths: ModelPaths) -> Self {
        Self {
            kind,
            paths,
            slot: RwLock::new(None),
            stats: InferenceStats::default(),
        }
    }

    /// Registry around an already-built model.
    pub fn with_model(model: LoadedModel) -> Self {
        let registry = Self::new(EstimatorKind::default(), ModelPaths::default());
        *registry.slot.write() = Some(Arc::new(model));
        registry
    }

    pub fn kind(&self) -> EstimatorKind {
        self.kind
    }

    pub fn paths(&self) -> &ModelPaths {
        &self.paths
    }

    pub fn stats(&self) -> &InferenceStats {
        &self.stats
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Current model if loaded; never loads.
    pub fn current(&self) -> Option<Arc<LoadedModel>> {
        self.slot.read().clone()
    }

    /// Current model, loading it once if needed.
    pub fn get_or_load(&self) -> EngineResult<Arc<LoadedModel>> {
        if let Some(model) = self.slot.read().as_ref() {
            return Ok(Arc::clone(model));
        }

        let mut slot = self.slot.write();
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(LoadedModel::load(self.kind, &self.paths).map_err(|e| {
            log::error!("Model load failed: {}", e);
            e
        })?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Reload artifacts. On failure the previous model stays in place.
    pub fn reload(&self) -> EngineResult<ModelStatus> {
        log::info!("Reloading {} model", self.kind);
        let model = LoadedModel::load(self.kind, &self.paths)?;
        *self.slot.write() = Some(Arc::new(model));
        Ok(self.status())
    }

    pub fn unload(&self) {
        *self.slot.write() = None;
        log::info!("Model unloaded");
    }

    pub fn status(&self) -> ModelStatus {
        let layout = LayoutInfo::current();
        let model = self.current();
        let metadata = model.as_ref().map(|m| &m.metadata);

        ModelStatus {
            model_loaded: model.is_some(),
            estimator: metadata
                .map(|m| m.estimator.clone())
                .unwrap_or_else(|| self.kind.to_string()),
            model_path: metadata.and_then(|m| m.model_path.clone()),
            sha256: metadata.and_then(|m| m.sha256.clone()),
            scaler_path: metadata.and_then(|m| m.scaler_path.clone()),
            loaded_at: metadata.map(|m| m.loaded_at),
            feature_version: layout.version,
            layout_hash: format!("{:08x}", layout.hash),
            feature_names: layout.feature_names,
            inference_count: self.stats.count(),
            avg_latency_ms: self.stats.avg_latency_ms(),
        }
    }
}

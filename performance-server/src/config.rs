//! Configuration module

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use performance_core::constants::{DEFAULT_METADATA_PATH, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use performance_core::{EstimatorKind, ModelPaths};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// ONNX model artifact
    pub model_path: PathBuf,

    /// Scaler sidecar (optional file)
    pub scaler_path: PathBuf,

    /// Layout metadata (optional file)
    pub metadata_path: PathBuf,

    /// Which estimator backs predictions
    pub estimator: EstimatorKind,

    /// Environment (development, production)
    pub environment: String,

    /// Emit JSON log lines instead of the human format
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            metadata_path: PathBuf::from(DEFAULT_METADATA_PATH),
            estimator: EstimatorKind::default(),
            environment: "development".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(p) => p.parse().with_context(|| format!("invalid PORT '{}'", p))?,
            None => defaults.port,
        };

        let estimator = match var("ESTIMATOR") {
            Some(kind) => kind.parse::<EstimatorKind>().map_err(anyhow::Error::msg).context("invalid ESTIMATOR")?,
            None => defaults.estimator,
        };

        Ok(Self {
            port,
            model_path: var("MODEL_PATH").map(PathBuf::from).unwrap_or(defaults.model_path),
            scaler_path: var("SCALER_PATH").map(PathBuf::from).unwrap_or(defaults.scaler_path),
            metadata_path: var("MODEL_METADATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.metadata_path),
            estimator,
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_json: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths {
            model: self.model_path.clone(),
            scaler: self.scaler_path.clone(),
            metadata: self.metadata_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.estimator, EstimatorKind::Onnx);
        assert_eq!(config.model_path, PathBuf::from("models/model.onnx"));
        assert!(!config.is_production());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PORT", "9001"),
            ("ESTIMATOR", "heuristic"),
            ("MODEL_PATH", "/srv/model.onnx"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.port, 9001);
        assert_eq!(config.estimator, EstimatorKind::Heuristic);
        assert_eq!(config.model_paths().model, PathBuf::from("/srv/model.onnx"));
        assert!(config.is_production());
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(from_map(&[("PORT", "eighty")]).is_err());
        assert!(from_map(&[("ESTIMATOR", "xgboost")]).is_err());
    }
}

//! Prediction Pipeline
//!
//! Composes validation, features, estimator, correction and classification
//! for a single profile. Holds no state of its own.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::logic::classification::{classify, RiskLevel, StudentClass};
use crate::logic::constraints::correct;
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{engineer_features, FeatureVector};
use crate::logic::model::{Estimator, FeatureScaler, LoadedModel, ModelRegistry};
use crate::logic::profile::StudentProfile;
use crate::logic::validation::validate_input;

/// Round to 2 decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Full outcome for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Corrected score in [0, 100], 2 decimals
    pub adjusted_score: f64,
    /// Estimator output before correction
    pub raw_prediction: f64,
    pub classification: StudentClass,
    pub risk_level: RiskLevel,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    /// adjusted score minus previous score, 2 decimals
    pub performance_gap: f64,
    /// Correction rules that fired, in cascade order
    pub applied_rules: Vec<&'static str>,
    /// Validator advisories, when the result came from raw input
    pub input_warnings: Vec<String>,
}

impl PredictionResult {
    pub fn description(&self) -> &'static str {
        self.classification.description()
    }
}

#[derive(Clone)]
pub struct Predictor {
    estimator: Arc<dyn Estimator>,
    scaler: Option<Arc<dyn FeatureScaler>>,
}

impl Predictor {
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        Self { estimator, scaler: None }
    }

    pub fn with_scaler(mut self, scaler: Arc<dyn FeatureScaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn from_model(model: &LoadedModel) -> Self {
        Self {
            estimator: Arc::clone(&model.estimator),
            scaler: model.scaler.clone(),
        }
    }

    /// Features as the estimator sees them (scaled when a scaler is set)
    pub fn features(&self, profile: &StudentProfile) -> FeatureVector {
        let features = engineer_features(profile);
        match &self.scaler {
            Some(scaler) => scaler.scale(&features),
            None => features,
        }
    }

    /// Estimator output; non-finite values are an inference failure.
    pub fn raw_prediction(&self, profile: &StudentProfile) -> EngineResult<f64> {
        let features = self.features(profile);
        log::debug!("features: {}", features.to_log_entry());

        let raw = self.estimator.predict(&features)?;
        if !raw.is_finite() {
            return Err(EngineError::Inference(format!(
                "{} returned a non-finite prediction ({})",
                self.estimator.name(),
                raw
            )));
        }
        Ok(raw)
    }

    /// Predict, correct and classify a validated profile.
    pub fn predict(&self, profile: &StudentProfile) -> EngineResult<PredictionResult> {
        let raw = self.raw_prediction(profile)?;
        let correction = correct(raw, profile);
        let adjusted = round2(correction.adjusted);
        let classification = classify(profile, adjusted);

        log::debug!(
            "raw {:.3} -> {:.2} [{}] {} ({})",
            raw,
            adjusted,
            correction.applied.join(", "),
            classification.classification,
            classification.risk_level
        );

        Ok(PredictionResult {
            adjusted_score: adjusted,
            raw_prediction: raw,
            classification: classification.classification,
            risk_level: classification.risk_level,
            warnings: classification.warnings,
            recommendations: classification.recommendations,
            performance_gap: classification.performance_gap,
            applied_rules: correction.applied,
            input_warnings: Vec::new(),
        })
    }

    /// Validate a raw request body, then predict. Invalid input never
    /// reaches the estimator.
    pub fn predict_input(&self, body: &Value) -> EngineResult<PredictionResult> {
        let validated = validate_input(body).into_result()?;
        let mut result = self.predict(&validated.profile)?;
        result.input_warnings = validated.warnings;
        Ok(result)
    }
}

impl ModelRegistry {
    /// Validate, load the model if needed, predict and record latency.
    pub fn predict_input(&self, body: &Value) -> EngineResult<PredictionResult> {
        let validated = validate_input(body).into_result()?;
        let model = self.get_or_load()?;
        let predictor = Predictor::from_model(&model);

        let started = Instant::now();
        let mut result = predictor.predict(&validated.profile)?;
        self.stats().record(started.elapsed());

        result.input_warnings = validated.warnings;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{ConstantEstimator, StandardScaler};
    use crate::FEATURE_COUNT;

    struct FixedRaw(f64);

    impl Estimator for FixedRaw {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureVector) -> EngineResult<f64> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl Estimator for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn predict(&self, _features: &FeatureVector) -> EngineResult<f64> {
            Err(EngineError::Inference("boom".to_string()))
        }
    }

    /// Echoes the first feature so scaling is observable
    struct EchoFirst;

    impl Estimator for EchoFirst {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn predict(&self, features: &FeatureVector) -> EngineResult<f64> {
            Ok(features.values[0])
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345678), 12.35);
        assert_eq!(round2(-3.004), -3.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_non_finite_is_inference_error() {
        let profile = StudentProfile::new(5, 60, false, 8, 3);
        for raw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Predictor::new(Arc::new(FixedRaw(raw))).predict(&profile).unwrap_err();
            assert!(matches!(err, EngineError::Inference(_)));
        }
    }

    #[test]
    fn test_estimator_error_propagates() {
        let profile = StudentProfile::new(5, 60, false, 8, 3);
        let err = Predictor::new(Arc::new(Failing)).predict(&profile).unwrap_err();
        assert_eq!(err.to_string(), "inference failed: boom");
    }

    #[test]
    fn test_scaler_applied_before_estimator() {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        mean[0] = 1.0;
        scale[0] = 0.1;

        // hours 5 -> (5 - 1) / 0.1 = 40
        let predictor = Predictor::new(Arc::new(EchoFirst))
            .with_scaler(Arc::new(StandardScaler::new(mean, scale)));
        let profile = StudentProfile::new(5, 60, false, 8, 3);
        assert_eq!(predictor.raw_prediction(&profile).unwrap(), 40.0);
    }

    #[test]
    fn test_invalid_input_never_reaches_estimator() {
        let estimator = Arc::new(ConstantEstimator::new(50.0));
        let predictor = Predictor::new(estimator.clone());
        let body = serde_json::json!({
            "hours_studied": 5,
            "previous_scores": 60,
            "extracurricular": false,
            "sleep_hours": 25,
            "sample_papers": 3,
        });

        match predictor.predict_input(&body).unwrap_err() {
            EngineError::Validation(errors) => {
                assert_eq!(errors.get("sleep_hours").map(String::as_str), Some("Must be 0-24"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(estimator.calls(), 0);
    }

    #[test]
    fn test_registry_predict_records_stats() {
        let registry = ModelRegistry::with_model(LoadedModel::new(
            Arc::new(ConstantEstimator::new(65.0)),
            None,
        ));
        let body = serde_json::json!({
            "hours_studied": 5,
            "previous_scores": 60,
            "extracurricular": false,
            "sleep_hours": 8,
            "sample_papers": 3,
        });

        let result = registry.predict_input(&body).unwrap();
        assert_eq!(result.adjusted_score, 65.0);
        assert_eq!(registry.stats().count(), 1);
    }
}

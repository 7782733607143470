//! Heuristic Estimator
//!
//! Noise-free version of the formula the synthetic training data was drawn
//! from. Deterministic and dependency-free, for development without a
//! trained artifact. Reads only the raw features (indices 0-4).

use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::FeatureVector;
use super::estimator::Estimator;

/// Study hours after which each extra hour counts less
const DIMINISHING_AFTER: f64 = 8.0;
const MAX_PRACTICE_CONTRIBUTION: f64 = 20.0;
const EXTRACURRICULAR_BONUS: f64 = 3.0;
const IMPROVEMENT_LIMIT: f64 = 25.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl HeuristicEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Multiplier on the study contribution; 1.0 inside 7-9h.
    pub fn sleep_multiplier(sleep: f64) -> f64 {
        if (7.0..=9.0).contains(&sleep) {
            1.0
        } else if (6.0..7.0).contains(&sleep) || (sleep > 9.0 && sleep <= 10.0) {
            0.9
        } else if (5.0..6.0).contains(&sleep) || (sleep > 10.0 && sleep <= 11.0) {
            0.75
        } else if (4.0..5.0).contains(&sleep) {
            0.6
        } else if sleep < 4.0 {
            0.4
        } else {
            0.7
        }
    }

    fn study_contribution(hours: f64) -> f64 {
        if hours <= 0.0 {
            0.0
        } else if hours <= DIMINISHING_AFTER {
            hours * 3.5
        } else {
            DIMINISHING_AFTER * 3.5 + (hours - DIMINISHING_AFTER) * 1.5
        }
    }

    /// Score for raw inputs, rounded to one decimal like the training targets.
    pub fn score(hours: f64, previous: f64, extracurricular: bool, sleep: f64, papers: f64) -> f64 {
        let base = previous * 0.4;
        let study = Self::study_contribution(hours) * Self::sleep_multiplier(sleep);
        let practice = (papers * 2.5).min(MAX_PRACTICE_CONTRIBUTION);
        let bonus = if extracurricular { EXTRACURRICULAR_BONUS } else { 0.0 };

        let mut performance = base + study + practice + bonus;

        if hours > 12.0 && sleep < 5.0 {
            performance *= 0.6;
        }
        if sleep < 3.0 {
            performance *= 0.5;
        }
        if hours == 0.0 {
            performance = performance.min(previous * 0.6);
        }

        let performance = performance
            .clamp(0.0, 100.0)
            .min(previous + IMPROVEMENT_LIMIT);

        (performance * 10.0).round() / 10.0
    }
}

impl Estimator for HeuristicEstimator {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn predict(&self, features: &FeatureVector) -> EngineResult<f64> {
        features
            .validate()
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let v = &features.values;
        Ok(Self::score(v[0], v[1], v[2] >= 0.5, v[3], v[4]))
    }
}

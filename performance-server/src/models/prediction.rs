//! Prediction response payload

use performance_core::{round2, PredictionResult, RiskLevel, StudentClass};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Body of a successful `POST /api/predict`
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub predicted_performance_index: f64,
    pub student_classification: StudentClass,
    pub description: &'static str,
    pub risk_level: RiskLevel,
    pub performance_gap: f64,
    pub analysis: Analysis,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_warnings: Vec<String>,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_performance_index: round2(result.adjusted_score),
            description: result.description(),
            student_classification: result.classification,
            risk_level: result.risk_level,
            performance_gap: round2(result.performance_gap),
            analysis: Analysis {
                warnings: result.warnings,
                recommendations: result.recommendations,
            },
            input_warnings: result.input_warnings,
        }
    }
}

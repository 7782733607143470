//! Classification Types
//!
//! Data structures only, no logic beyond lookups.

use serde::{Deserialize, Serialize, Serializer};

use crate::logic::profile::StudentProfile;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Ordinal advisory severity. Ordering is the escalation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Raise to at least `level`; never lowers.
    pub fn escalate(&mut self, level: RiskLevel) {
        if level > *self {
            *self = level;
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// STUDENT CLASS
// ============================================================================

/// Closed label set. Description text is tied to the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentClass {
    MedicalEmergency,
    UnpreparedFailing,
    HealthCrisis,
    SleepDeprivedCritical,
    BurnoutRisk,
    SleepDeprived,
    Oversleeper,
    Underprepared,
    HighPerformer,
    Underachiever,
    EfficientLearner,
    StrugglingStudent,
    NeedsImprovement,
    AverageStudent,
}

impl StudentClass {
    pub const ALL: [StudentClass; 14] = [
        StudentClass::MedicalEmergency,
        StudentClass::UnpreparedFailing,
        StudentClass::HealthCrisis,
        StudentClass::SleepDeprivedCritical,
        StudentClass::BurnoutRisk,
        StudentClass::SleepDeprived,
        StudentClass::Oversleeper,
        StudentClass::Underprepared,
        StudentClass::HighPerformer,
        StudentClass::Underachiever,
        StudentClass::EfficientLearner,
        StudentClass::StrugglingStudent,
        StudentClass::NeedsImprovement,
        StudentClass::AverageStudent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StudentClass::MedicalEmergency => "Medical Emergency",
            StudentClass::UnpreparedFailing => "Unprepared - Failing",
            StudentClass::HealthCrisis => "Health Crisis",
            StudentClass::SleepDeprivedCritical => "Sleep Deprived - Critical",
            StudentClass::BurnoutRisk => "Burnout Risk",
            StudentClass::SleepDeprived => "Sleep Deprived",
            StudentClass::Oversleeper => "Oversleeper",
            StudentClass::Underprepared => "Underprepared",
            StudentClass::HighPerformer => "High Performer",
            StudentClass::Underachiever => "Underachiever",
            StudentClass::EfficientLearner => "Efficient Learner",
            StudentClass::StrugglingStudent => "Struggling Student",
            StudentClass::NeedsImprovement => "Needs Improvement",
            StudentClass::AverageStudent => "Average Student",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StudentClass::MedicalEmergency => {
                "No sleep at all makes meaningful exam performance impossible. Health comes first."
            }
            StudentClass::UnpreparedFailing => {
                "No study time and no practice papers. On track to fail without immediate change."
            }
            StudentClass::HealthCrisis => {
                "Sleeping more than 14 hours a day points to an underlying health issue."
            }
            StudentClass::SleepDeprivedCritical => {
                "Severe sleep deprivation is critically impairing memory and concentration."
            }
            StudentClass::BurnoutRisk => {
                "Long study days without enough rest. Performance is likely to collapse."
            }
            StudentClass::SleepDeprived => "Insufficient sleep is limiting the benefit of study time.",
            StudentClass::Oversleeper => "Oversleeping is cutting into productive study time.",
            StudentClass::Underprepared => "Too little study and practice for a good result.",
            StudentClass::HighPerformer => {
                "Strong preparation with healthy habits. Expected to perform well."
            }
            StudentClass::Underachiever => {
                "Past results show potential that current effort is not realising."
            }
            StudentClass::EfficientLearner => {
                "Good results from a moderate, well-balanced workload."
            }
            StudentClass::StrugglingStudent => "Low expected performance. Needs structured support.",
            StudentClass::NeedsImprovement => "Below-average expected performance with room to grow.",
            StudentClass::AverageStudent => "Typical preparation and expected performance.",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.label() == label)
    }
}

impl std::fmt::Display for StudentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for StudentClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Profile paired with its corrected score; context for label rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredProfile {
    pub profile: StudentProfile,
    pub score: f64,
}

impl ScoredProfile {
    pub fn gap(&self) -> f64 {
        self.score - self.profile.previous()
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub classification: StudentClass,
    pub risk_level: RiskLevel,
    /// Insertion order
    pub warnings: Vec<String>,
    /// Insertion order
    pub recommendations: Vec<String>,
    /// adjusted score minus previous score, rounded to 2 decimals
    pub performance_gap: f64,
}

impl ClassificationResult {
    pub fn description(&self) -> &'static str {
        self.classification.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_escalation_never_lowers() {
        let mut risk = RiskLevel::Low;
        risk.escalate(RiskLevel::High);
        risk.escalate(RiskLevel::Medium);
        assert_eq!(risk, RiskLevel::High);
        risk.escalate(RiskLevel::Critical);
        assert_eq!(risk, RiskLevel::Critical);
    }

    #[test]
    fn test_risk_serializes_as_name() {
        assert_eq!(serde_json::to_value(RiskLevel::Critical).unwrap(), "Critical");
    }

    #[test]
    fn test_labels_unique_and_round_trip() {
        for class in StudentClass::ALL {
            assert_eq!(StudentClass::from_label(class.label()), Some(class));
            assert!(!class.description().is_empty());
        }
    }

    #[test]
    fn test_class_serializes_as_label() {
        let value = serde_json::to_value(StudentClass::UnpreparedFailing).unwrap();
        assert_eq!(value, "Unprepared - Failing");
    }
}

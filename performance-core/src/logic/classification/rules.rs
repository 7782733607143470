//! Classification Rules
//!
//! Rule tables only. Evaluation order lives in `classifier`.

use crate::logic::profile::StudentProfile;
use crate::logic::rules::{Rule, RuleGroup};
use super::types::{RiskLevel, ScoredProfile, StudentClass};

// ============================================================================
// EARLY EXITS
// ============================================================================

/// Critical case that ends classification immediately
pub struct EarlyExit {
    pub class: StudentClass,
    pub warning: &'static str,
    pub recommendation: &'static str,
}

pub static EARLY_EXITS: &[Rule<StudentProfile, EarlyExit>] = &[
    Rule {
        name: "no_sleep",
        when: |p| p.sleep_hours == 0,
        then: EarlyExit {
            class: StudentClass::MedicalEmergency,
            warning: "CRITICAL: No sleep reported - this is a medical emergency",
            recommendation: "Seek medical attention and restore a regular sleep schedule before studying",
        },
    },
    Rule {
        name: "unprepared",
        when: |p| p.is_unprepared(),
        then: EarlyExit {
            class: StudentClass::UnpreparedFailing,
            warning: "CRITICAL: No study time and no practice papers",
            recommendation: "Start immediately with 2-3 hours of daily study and at least one practice paper",
        },
    },
    Rule {
        name: "extreme_oversleep",
        when: |p| p.sleep_hours > 14,
        then: EarlyExit {
            class: StudentClass::HealthCrisis,
            warning: "CRITICAL: More than 14 hours of sleep per day",
            recommendation: "Consult a doctor about excessive sleep",
        },
    },
];

// ============================================================================
// ACCUMULATING ADVISORIES
// ============================================================================

/// Warning, recommendation and the risk floor they imply
pub struct Advisory {
    pub warning: &'static str,
    pub recommendation: &'static str,
    pub risk: RiskLevel,
}

type AdvisoryRule = Rule<StudentProfile, Advisory>;

static SLEEP_TIERS: &[AdvisoryRule] = &[
    Rule {
        name: "sleep_severe",
        when: |p| p.sleep_hours < 4,
        then: Advisory {
            warning: "Severe sleep deprivation (under 4 hours) heavily impairs memory and focus",
            recommendation: "Get at least 7-8 hours of sleep before adding more study time",
            risk: RiskLevel::Critical,
        },
    },
    Rule {
        name: "sleep_insufficient",
        when: |p| p.sleep_hours < 6,
        then: Advisory {
            warning: "Insufficient sleep (under 6 hours) reduces learning efficiency",
            recommendation: "Aim for 7-9 hours of sleep per night",
            risk: RiskLevel::High,
        },
    },
    Rule {
        name: "sleep_short",
        when: |p| p.sleep_hours < 7,
        then: Advisory {
            warning: "Sleep is slightly below the recommended 7-9 hours",
            recommendation: "Add an extra hour of sleep where possible",
            risk: RiskLevel::Medium,
        },
    },
];

static BURNOUT: &[AdvisoryRule] = &[
    Rule {
        name: "burnout_severe",
        when: |p| p.hours_studied > 12 && p.sleep_hours < 5,
        then: Advisory {
            warning: "Extreme study load with very little sleep - high burnout risk",
            recommendation: "Cut study hours and rest; long sessions without sleep are counterproductive",
            risk: RiskLevel::Critical,
        },
    },
    Rule {
        name: "burnout",
        when: |p| p.is_burnout_pattern(),
        then: Advisory {
            warning: "Long study days with insufficient sleep risk burnout",
            recommendation: "Balance study hours with adequate rest",
            risk: RiskLevel::High,
        },
    },
];

static OVERSLEEP: &[AdvisoryRule] = &[
    Rule {
        name: "oversleep_severe",
        when: |p| p.sleep_hours > 12,
        then: Advisory {
            warning: "Sleeping more than 12 hours may indicate low energy or health problems",
            recommendation: "Consult a doctor if excessive sleep persists",
            risk: RiskLevel::High,
        },
    },
    Rule {
        name: "oversleep",
        when: |p| p.sleep_hours > 10,
        then: Advisory {
            warning: "Sleeping more than 10 hours reduces available study time",
            recommendation: "Keep sleep to 7-9 hours and use the extra time for study",
            risk: RiskLevel::Medium,
        },
    },
];

static STUDY: &[AdvisoryRule] = &[
    Rule {
        name: "no_study",
        when: |p| p.hours_studied == 0,
        then: Advisory {
            warning: "No study time reported",
            recommendation: "Start with at least 2-3 hours of focused study per day",
            risk: RiskLevel::High,
        },
    },
    Rule {
        name: "insufficient_study",
        when: |p| p.hours_studied < 3,
        then: Advisory {
            warning: "Study time is below 3 hours per day",
            recommendation: "Increase study time to at least 3-4 hours per day",
            risk: RiskLevel::Medium,
        },
    },
];

static PRACTICE: &[AdvisoryRule] = &[Rule {
    name: "no_practice",
    when: |p| p.sample_papers == 0,
    then: Advisory {
        warning: "No practice papers attempted",
        recommendation: "Work through at least 3-5 sample papers before the exam",
        risk: RiskLevel::Medium,
    },
}];

/// Independent groups, evaluated in this order
pub static ADVISORY_GROUPS: &[RuleGroup<StudentProfile, Advisory>] = &[
    RuleGroup { name: "sleep", rules: SLEEP_TIERS },
    RuleGroup { name: "burnout", rules: BURNOUT },
    RuleGroup { name: "oversleep", rules: OVERSLEEP },
    RuleGroup { name: "study", rules: STUDY },
    RuleGroup { name: "practice", rules: PRACTICE },
];

// ============================================================================
// LABEL PRIORITY LIST
// ============================================================================

/// Fallback when no label rule matches
pub const FALLBACK_CLASS: StudentClass = StudentClass::AverageStudent;

/// Mutually exclusive labels, highest priority first
pub static LABEL_RULES: &[Rule<ScoredProfile, StudentClass>] = &[
    Rule {
        name: "sleep_deprived_critical",
        when: |s| s.profile.sleep_hours < 4,
        then: StudentClass::SleepDeprivedCritical,
    },
    Rule {
        name: "burnout_risk",
        when: |s| s.profile.is_burnout_pattern(),
        then: StudentClass::BurnoutRisk,
    },
    Rule {
        name: "sleep_deprived",
        when: |s| s.profile.sleep_hours < 6,
        then: StudentClass::SleepDeprived,
    },
    Rule {
        name: "oversleeper",
        when: |s| s.profile.sleep_hours > 10,
        then: StudentClass::Oversleeper,
    },
    Rule {
        name: "underprepared",
        when: |s| s.profile.hours_studied < 3 && s.profile.sample_papers < 2,
        then: StudentClass::Underprepared,
    },
    Rule {
        name: "high_performer_prepared",
        when: |s| s.score >= 80.0 && s.profile.hours_studied >= 5 && s.profile.sample_papers >= 5,
        then: StudentClass::HighPerformer,
    },
    Rule {
        name: "underachiever",
        when: |s| s.profile.previous_scores >= 70 && s.score < s.profile.previous() - 10.0,
        then: StudentClass::Underachiever,
    },
    Rule {
        name: "efficient_learner",
        when: |s| s.profile.hours_studied <= 6 && s.score >= 70.0,
        then: StudentClass::EfficientLearner,
    },
    Rule {
        name: "high_performer",
        when: |s| s.score >= 80.0,
        then: StudentClass::HighPerformer,
    },
    Rule {
        name: "struggling",
        when: |s| s.score < 40.0,
        then: StudentClass::StrugglingStudent,
    },
    Rule {
        name: "needs_improvement",
        when: |s| s.score < 55.0,
        then: StudentClass::NeedsImprovement,
    },
];

// ============================================================================
// PERFORMANCE GAP
// ============================================================================

/// Recommendation and optional risk floor for a predicted gap
pub struct GapAdvice {
    pub recommendation: &'static str,
    pub risk: Option<RiskLevel>,
}

pub const GAP_IMPROVEMENT: f64 = 10.0;
pub const GAP_DECLINE: f64 = -10.0;
pub const GAP_SLIP: f64 = -5.0;

pub static GAP_RULES: &[Rule<f64, GapAdvice>] = &[
    Rule {
        name: "improving",
        when: |gap| *gap > GAP_IMPROVEMENT,
        then: GapAdvice {
            recommendation: "Predicted to improve on the previous score - keep up the current routine",
            risk: None,
        },
    },
    Rule {
        name: "declining",
        when: |gap| *gap < GAP_DECLINE,
        then: GapAdvice {
            recommendation: "Predicted to fall well below the previous score - review study habits with a tutor or mentor",
            risk: Some(RiskLevel::High),
        },
    },
    Rule {
        name: "slipping",
        when: |gap| *gap < GAP_SLIP,
        then: GapAdvice {
            recommendation: "Predicted to slip slightly below the previous score - revisit weak topics",
            risk: Some(RiskLevel::Medium),
        },
    },
];

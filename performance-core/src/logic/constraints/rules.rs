//! Correction Stages & Adjustments
//!
//! No cascade logic here - only the tables and how one adjustment acts.
//! Guards always read the raw profile, never engineered features.

use serde::{Deserialize, Serialize};

use crate::logic::profile::StudentProfile;
use crate::logic::rules::{first_match, Rule};

// ============================================================================
// BOUNDS
// ============================================================================

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

// ============================================================================
// ADJUSTMENTS
// ============================================================================

/// One transform of the running prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Replace the running value
    Set(f64),
    /// Multiply
    Scale(f64),
    /// Multiply, then cap at an absolute ceiling
    ScaleCapped { factor: f64, ceiling: f64 },
    /// Absolute ceiling
    Cap(f64),
    /// Ceiling at a fraction of the previous score
    CapToPrevious(f64),
    /// Clamp into [min, max]
    Clamp { min: f64, max: f64 },
    /// Ceiling at previous score plus the preparation tier margin
    ImprovementCap,
}

impl Adjustment {
    pub fn apply(self, value: f64, profile: &StudentProfile) -> f64 {
        match self {
            Adjustment::Set(v) => v,
            Adjustment::Scale(factor) => value * factor,
            Adjustment::ScaleCapped { factor, ceiling } => (value * factor).min(ceiling),
            Adjustment::Cap(ceiling) => value.min(ceiling),
            Adjustment::CapToPrevious(fraction) => value.min(profile.previous() * fraction),
            Adjustment::Clamp { min, max } => value.clamp(min, max),
            Adjustment::ImprovementCap => value.min(improvement_ceiling(profile)),
        }
    }
}

pub type CorrectionRule = Rule<StudentProfile, &'static [Adjustment]>;

/// Named, ordered stage; first matching rule wins inside it
pub struct Stage {
    pub name: &'static str,
    pub rules: &'static [CorrectionRule],
}

// ============================================================================
// PREPARATION TIERS (improvement cap)
// ============================================================================

/// How far above the previous score a prediction may go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreparationTier {
    /// 8h+ study, 7+ papers, 7-9h sleep
    Excellent,
    /// 6h+ study, 5+ papers, 6-10h sleep
    Good,
    Standard,
}

impl PreparationTier {
    pub fn of(profile: &StudentProfile) -> Self {
        first_match(PREPARATION_TIERS, profile)
            .map(|rule| rule.then)
            .unwrap_or(PreparationTier::Standard)
    }

    pub fn margin(&self) -> f64 {
        match self {
            PreparationTier::Excellent => 35.0,
            PreparationTier::Good => 30.0,
            PreparationTier::Standard => 25.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreparationTier::Excellent => "excellent",
            PreparationTier::Good => "good",
            PreparationTier::Standard => "standard",
        }
    }
}

static PREPARATION_TIERS: &[Rule<StudentProfile, PreparationTier>] = &[
    Rule {
        name: "excellent_preparation",
        when: |p| p.hours_studied >= 8 && p.sample_papers >= 7 && (7..=9).contains(&p.sleep_hours),
        then: PreparationTier::Excellent,
    },
    Rule {
        name: "good_preparation",
        when: |p| p.hours_studied >= 6 && p.sample_papers >= 5 && (6..=10).contains(&p.sleep_hours),
        then: PreparationTier::Good,
    },
];

/// `previous_scores + tier margin`
pub fn improvement_ceiling(profile: &StudentProfile) -> f64 {
    profile.previous() + PreparationTier::of(profile).margin()
}

// ============================================================================
// STAGES
// ============================================================================

static SLEEP_DEPRIVATION: &[CorrectionRule] = &[
    Rule { name: "sleep_0h", when: |p| p.sleep_hours == 0, then: &[Adjustment::Set(0.0)] },
    Rule {
        name: "sleep_1h",
        when: |p| p.sleep_hours == 1,
        then: &[Adjustment::ScaleCapped { factor: 0.05, ceiling: 5.0 }],
    },
    Rule {
        name: "sleep_2h",
        when: |p| p.sleep_hours == 2,
        then: &[Adjustment::ScaleCapped { factor: 0.1, ceiling: 10.0 }],
    },
    Rule { name: "sleep_under_4h", when: |p| p.sleep_hours < 4, then: &[Adjustment::Scale(0.2)] },
    Rule { name: "sleep_under_5h", when: |p| p.sleep_hours < 5, then: &[Adjustment::Scale(0.4)] },
    Rule { name: "sleep_under_6h", when: |p| p.sleep_hours < 6, then: &[Adjustment::Scale(0.6)] },
];

static LOW_STUDY: &[CorrectionRule] = &[
    Rule {
        name: "no_study_no_practice",
        when: |p| p.hours_studied == 0 && p.sample_papers == 0,
        then: &[Adjustment::CapToPrevious(0.3), Adjustment::Cap(5.0)],
    },
    Rule { name: "no_study", when: |p| p.hours_studied == 0, then: &[Adjustment::CapToPrevious(0.3)] },
    Rule { name: "study_1h", when: |p| p.hours_studied == 1, then: &[Adjustment::CapToPrevious(0.5)] },
    Rule { name: "study_under_3h", when: |p| p.hours_studied < 3, then: &[Adjustment::CapToPrevious(0.7)] },
];

static OVERSLEEP: &[CorrectionRule] = &[
    Rule { name: "sleep_over_14h", when: |p| p.sleep_hours > 14, then: &[Adjustment::Scale(0.3)] },
    Rule { name: "sleep_over_12h", when: |p| p.sleep_hours > 12, then: &[Adjustment::Scale(0.5)] },
    Rule { name: "sleep_over_10h", when: |p| p.sleep_hours > 10, then: &[Adjustment::Scale(0.75)] },
];

static BURNOUT: &[CorrectionRule] = &[
    Rule {
        name: "burnout_severe",
        when: |p| p.hours_studied > 12 && p.sleep_hours < 5,
        then: &[Adjustment::Scale(0.3)],
    },
    Rule {
        name: "burnout",
        when: |p| p.hours_studied > 10 && p.sleep_hours < 6,
        then: &[Adjustment::Scale(0.5)],
    },
    Rule {
        name: "burnout_mild",
        when: |p| p.hours_studied > 8 && p.sleep_hours < 5,
        then: &[Adjustment::Scale(0.6)],
    },
];

static PRACTICE: &[CorrectionRule] = &[
    Rule { name: "no_practice", when: |p| p.sample_papers == 0, then: &[Adjustment::Scale(0.7)] },
    Rule { name: "little_practice", when: |p| p.sample_papers < 3, then: &[Adjustment::Scale(0.85)] },
];

static LOW_EFFORT: &[CorrectionRule] = &[
    Rule {
        name: "low_effort_cap_15",
        when: |p| p.previous_scores < 30 && p.hours_studied < 2 && p.sample_papers < 2,
        then: &[Adjustment::Cap(15.0)],
    },
    Rule {
        name: "low_effort_cap_25",
        when: |p| p.previous_scores < 40 && p.hours_studied < 3 && p.sample_papers < 2,
        then: &[Adjustment::Cap(25.0)],
    },
    Rule {
        name: "low_effort_cap_35",
        when: |p| p.previous_scores < 50 && p.hours_studied < 4 && p.sample_papers < 3,
        then: &[Adjustment::Cap(35.0)],
    },
];

static HARD_BOUNDS: &[CorrectionRule] = &[Rule {
    name: "hard_bounds",
    when: |_| true,
    then: &[Adjustment::Clamp { min: SCORE_MIN, max: SCORE_MAX }],
}];

static IMPROVEMENT: &[CorrectionRule] = &[Rule {
    name: "improvement_cap",
    when: |_| true,
    then: &[Adjustment::ImprovementCap],
}];

static FINAL_CEILING: &[CorrectionRule] = &[Rule {
    name: "final_ceiling",
    when: |_| true,
    then: &[Adjustment::Cap(SCORE_MAX)],
}];

/// The correction cascade, in evaluation order
pub static CASCADE: &[Stage] = &[
    Stage { name: "sleep_deprivation", rules: SLEEP_DEPRIVATION },
    Stage { name: "low_study", rules: LOW_STUDY },
    Stage { name: "oversleep", rules: OVERSLEEP },
    Stage { name: "burnout", rules: BURNOUT },
    Stage { name: "practice", rules: PRACTICE },
    Stage { name: "low_effort", rules: LOW_EFFORT },
    Stage { name: "hard_bounds", rules: HARD_BOUNDS },
    Stage { name: "improvement_cap", rules: IMPROVEMENT },
    Stage { name: "final_ceiling", rules: FINAL_CEILING },
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(hours: u32, prev: u32, sleep: u32, papers: u32) -> StudentProfile {
        StudentProfile::new(hours, prev, false, sleep, papers)
    }

    fn stage(name: &str) -> &'static Stage {
        CASCADE.iter().find(|s| s.name == name).unwrap()
    }

    fn winner(name: &str, p: &StudentProfile) -> Option<&'static str> {
        first_match(stage(name).rules, p).map(|r| r.name)
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = CASCADE.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "sleep_deprivation", "low_study", "oversleep", "burnout", "practice",
                "low_effort", "hard_bounds", "improvement_cap", "final_ceiling",
            ]
        );
    }

    #[test]
    fn test_sleep_stage_most_severe_first() {
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 0, 3)), Some("sleep_0h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 1, 3)), Some("sleep_1h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 2, 3)), Some("sleep_2h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 3, 3)), Some("sleep_under_4h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 4, 3)), Some("sleep_under_5h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 5, 3)), Some("sleep_under_6h"));
        assert_eq!(winner("sleep_deprivation", &profile(5, 70, 6, 3)), None);
    }

    #[test]
    fn test_low_study_stage() {
        assert_eq!(winner("low_study", &profile(0, 60, 8, 0)), Some("no_study_no_practice"));
        assert_eq!(winner("low_study", &profile(0, 60, 8, 2)), Some("no_study"));
        assert_eq!(winner("low_study", &profile(1, 60, 8, 2)), Some("study_1h"));
        assert_eq!(winner("low_study", &profile(2, 60, 8, 2)), Some("study_under_3h"));
        assert_eq!(winner("low_study", &profile(3, 60, 8, 2)), None);
    }

    #[test]
    fn test_oversleep_stage() {
        assert_eq!(winner("oversleep", &profile(5, 60, 15, 3)), Some("sleep_over_14h"));
        assert_eq!(winner("oversleep", &profile(5, 60, 13, 3)), Some("sleep_over_12h"));
        assert_eq!(winner("oversleep", &profile(5, 60, 11, 3)), Some("sleep_over_10h"));
        assert_eq!(winner("oversleep", &profile(5, 60, 10, 3)), None);
    }

    #[test]
    fn test_burnout_stage_applies_at_most_one() {
        assert_eq!(winner("burnout", &profile(14, 75, 3, 10)), Some("burnout_severe"));
        assert_eq!(winner("burnout", &profile(11, 75, 5, 10)), Some("burnout"));
        assert_eq!(winner("burnout", &profile(9, 75, 4, 10)), Some("burnout_mild"));
        assert_eq!(winner("burnout", &profile(9, 75, 5, 10)), None);
    }

    #[test]
    fn test_low_effort_most_restrictive_first() {
        assert_eq!(winner("low_effort", &profile(1, 25, 8, 1)), Some("low_effort_cap_15"));
        assert_eq!(winner("low_effort", &profile(2, 35, 8, 1)), Some("low_effort_cap_25"));
        assert_eq!(winner("low_effort", &profile(3, 45, 8, 2)), Some("low_effort_cap_35"));
        assert_eq!(winner("low_effort", &profile(4, 45, 8, 2)), None);
    }

    #[test]
    fn test_preparation_tiers() {
        assert_eq!(PreparationTier::of(&profile(8, 80, 8, 7)), PreparationTier::Excellent);
        assert_eq!(PreparationTier::of(&profile(8, 80, 10, 7)), PreparationTier::Good);
        assert_eq!(PreparationTier::of(&profile(7, 85, 8, 6)), PreparationTier::Good);
        assert_eq!(PreparationTier::of(&profile(7, 85, 5, 6)), PreparationTier::Standard);
        assert_eq!(PreparationTier::of(&profile(5, 85, 8, 9)), PreparationTier::Standard);
    }

    #[test]
    fn test_improvement_ceiling() {
        assert_eq!(improvement_ceiling(&profile(8, 50, 8, 7)), 85.0);
        assert_eq!(improvement_ceiling(&profile(6, 50, 6, 5)), 80.0);
        assert_eq!(improvement_ceiling(&profile(2, 50, 8, 0)), 75.0);
    }

    #[test]
    fn test_adjustments() {
        let p = profile(0, 60, 8, 0);
        assert_eq!(Adjustment::Set(0.0).apply(80.0, &p), 0.0);
        assert_eq!(Adjustment::Scale(0.5).apply(80.0, &p), 40.0);
        assert_eq!(Adjustment::ScaleCapped { factor: 0.1, ceiling: 10.0 }.apply(80.0, &p), 8.0);
        assert_eq!(Adjustment::ScaleCapped { factor: 0.1, ceiling: 10.0 }.apply(150.0, &p), 10.0);
        assert_eq!(Adjustment::Cap(5.0).apply(80.0, &p), 5.0);
        assert_eq!(Adjustment::CapToPrevious(0.3).apply(80.0, &p), 18.0);
        assert_eq!(Adjustment::Clamp { min: 0.0, max: 100.0 }.apply(-3.0, &p), 0.0);
        assert_eq!(Adjustment::ImprovementCap.apply(99.0, &p), 85.0);
    }
}

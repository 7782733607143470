//! Correction Engine
//!
//! Cascade interpreter only. Input: raw estimator scalar + raw profile.
//! Output: plausibility-corrected score in [0, 100] and a trace of the rules
//! that fired.

use serde::Serialize;

use crate::logic::profile::StudentProfile;
use super::rules::{PreparationTier, Stage, CASCADE};

/// Outcome of running the cascade once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    /// Estimator output before any stage
    pub raw: f64,
    /// Final corrected score
    pub adjusted: f64,
    /// Names of the rules that fired, in order
    pub applied: Vec<&'static str>,
    /// Tier that set the improvement cap
    pub tier: PreparationTier,
}

impl Correction {
    pub fn fired(&self, rule: &str) -> bool {
        self.applied.iter().any(|name| *name == rule)
    }
}

/// Run the standard cascade.
pub fn correct(raw: f64, profile: &StudentProfile) -> Correction {
    correct_with_stages(raw, profile, CASCADE)
}

/// Run a custom cascade (tests, experiments).
pub fn correct_with_stages(raw: f64, profile: &StudentProfile, stages: &[Stage]) -> Correction {
    let mut value = raw;
    let mut applied = Vec::new();

    for stage in stages {
        let Some(rule) = stage.rules.iter().find(|rule| rule.applies(profile)) else {
            continue;
        };

        let before = value;
        for adjustment in rule.then {
            value = adjustment.apply(value, profile);
        }
        applied.push(rule.name);

        log::trace!("stage {} / {}: {:.3} -> {:.3}", stage.name, rule.name, before, value);
    }

    Correction {
        raw,
        adjusted: value,
        applied,
        tier: PreparationTier::of(profile),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::constraints::rules::improvement_ceiling;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Rules that always fire and leave an in-range value alone
    const BOOKKEEPING: &[&str] = &["hard_bounds", "improvement_cap", "final_ceiling"];

    fn penalties(correction: &Correction) -> Vec<&'static str> {
        correction
            .applied
            .iter()
            .copied()
            .filter(|name| !BOOKKEEPING.contains(name))
            .collect()
    }

    #[test]
    fn test_balanced_student_untouched() {
        let profile = StudentProfile::new(7, 85, true, 8, 6);
        let correction = correct(88.0, &profile);

        assert!(penalties(&correction).is_empty());
        assert_eq!(correction.adjusted, 88.0);
        assert_eq!(correction.tier, PreparationTier::Good);
    }

    #[test]
    fn test_balanced_student_capped_at_tier() {
        let profile = StudentProfile::new(7, 50, true, 8, 6);
        assert_eq!(correct(95.0, &profile).adjusted, 80.0);
    }

    #[test]
    fn test_burnout_penalties_compose() {
        // sleep <4 (x0.2) then burnout severe (x0.3); 10 papers skips practice stage
        let profile = StudentProfile::new(14, 75, false, 3, 10);
        let correction = correct(80.0, &profile);

        assert_eq!(penalties(&correction), vec!["sleep_under_4h", "burnout_severe"]);
        assert!(approx(correction.adjusted, 80.0 * 0.06));
    }

    #[test]
    fn test_burnout_and_no_practice_both_apply() {
        let profile = StudentProfile::new(11, 60, false, 5, 0);
        let correction = correct(80.0, &profile);

        assert_eq!(
            penalties(&correction),
            vec!["sleep_under_6h", "burnout", "no_practice"]
        );
        assert!(approx(correction.adjusted, 80.0 * 0.6 * 0.5 * 0.7));
    }

    #[test]
    fn test_no_study_no_practice_capped_at_five() {
        let profile = StudentProfile::new(0, 60, true, 10, 0);
        let correction = correct(70.0, &profile);

        assert!(correction.fired("no_study_no_practice"));
        assert!(correction.adjusted <= 5.0);
        // 70 -> min(70, 18) -> 5 -> x0.7 practice -> 3.5
        assert!(approx(correction.adjusted, 3.5));
    }

    #[test]
    fn test_two_hours_sleep_zero_study() {
        let profile = StudentProfile::new(0, 50, false, 2, 0);
        let correction = correct(60.0, &profile);

        assert_eq!(correction.applied[0], "sleep_2h");
        assert!(correction.adjusted <= 5.0);
    }

    #[test]
    fn test_zero_sleep_zeroes_prediction() {
        let profile = StudentProfile::new(6, 90, true, 0, 8);
        assert_eq!(correct(95.0, &profile).adjusted, 0.0);
    }

    #[test]
    fn test_one_hour_sleep_ceiling() {
        let profile = StudentProfile::new(6, 90, true, 1, 8);
        assert_eq!(correct(95.0, &profile).adjusted, 95.0 * 0.05);
        assert_eq!(correct(400.0, &profile).adjusted, 5.0);
    }

    #[test]
    fn test_oversleep_independent_of_sleep_deprivation() {
        let profile = StudentProfile::new(5, 70, false, 13, 4);
        let correction = correct(60.0, &profile);
        assert_eq!(penalties(&correction), vec!["sleep_over_12h"]);
        assert!(approx(correction.adjusted, 30.0));
    }

    #[test]
    fn test_low_effort_cap() {
        let profile = StudentProfile::new(1, 25, false, 8, 1);
        let correction = correct(90.0, &profile);
        // study_1h caps at 12.5 first, then x0.85 for little practice
        assert!(correction.fired("low_effort_cap_15"));
        assert!(approx(correction.adjusted, 12.5 * 0.85));
    }

    #[test]
    fn test_negative_and_huge_raw_values_bounded() {
        let profile = StudentProfile::new(5, 60, false, 8, 4);
        assert_eq!(correct(-20.0, &profile).adjusted, 0.0);
        assert_eq!(correct(1e9, &profile).adjusted, 85.0);
    }

    #[test]
    fn test_bounds_and_cap_hold_everywhere() {
        for hours in [0u32, 1, 2, 3, 6, 8, 9, 11, 13, 24] {
            for sleep in 0..=24u32 {
                for papers in [0u32, 1, 2, 3, 5, 7, 20] {
                    for prev in [0u32, 20, 35, 45, 70, 100] {
                        let profile = StudentProfile::new(hours, prev, false, sleep, papers);
                        for raw in [-50.0, 0.0, 42.0, 99.0, 250.0] {
                            let adjusted = correct(raw, &profile).adjusted;
                            assert!((0.0..=100.0).contains(&adjusted), "{:?} raw {}", profile, raw);
                            assert!(adjusted <= improvement_ceiling(&profile));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_cascade_is_identity() {
        let profile = StudentProfile::new(0, 0, false, 0, 0);
        let correction = correct_with_stages(123.0, &profile, &[]);
        assert_eq!(correction.adjusted, 123.0);
        assert!(correction.applied.is_empty());
    }
}

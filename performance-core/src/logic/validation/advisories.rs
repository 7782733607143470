//! Input advisories
//!
//! Cross-field plausibility notes computed after the fatal pass. They are
//! surfaced in the response as `input_warnings` and never block processing.

use crate::logic::profile::StudentProfile;
use crate::logic::rules::{fired, Rule, RuleGroup};

type AdvisoryRule = Rule<StudentProfile, &'static str>;

static DAY_LENGTH: &[AdvisoryRule] = &[Rule {
    name: "day_overflow",
    when: |p| p.hours_studied + p.sleep_hours > 24,
    then: "Study hours plus sleep hours exceed 24 hours per day",
}];

static SLEEP_EXTREMES: &[AdvisoryRule] = &[
    Rule {
        name: "no_sleep",
        when: |p| p.sleep_hours == 0,
        then: "Zero hours of sleep reported",
    },
    Rule {
        name: "very_low_sleep",
        when: |p| p.sleep_hours < 4,
        then: "Fewer than 4 hours of sleep reported",
    },
    Rule {
        name: "very_high_sleep",
        when: |p| p.sleep_hours > 14,
        then: "More than 14 hours of sleep reported",
    },
];

static STUDY_EXTREMES: &[AdvisoryRule] = &[Rule {
    name: "very_high_study",
    when: |p| p.hours_studied > 16,
    then: "More than 16 hours of daily study reported",
}];

static BURNOUT: &[AdvisoryRule] = &[Rule {
    name: "burnout_combination",
    when: |p| p.is_burnout_pattern(),
    then: "High study hours combined with low sleep suggests burnout risk",
}];

static PREPARATION: &[AdvisoryRule] = &[Rule {
    name: "zero_preparation",
    when: |p| p.is_unprepared(),
    then: "No study hours and no practice papers reported",
}];

/// Advisory groups, reported in this order
pub static INPUT_ADVISORIES: &[RuleGroup<StudentProfile, &'static str>] = &[
    RuleGroup { name: "day_length", rules: DAY_LENGTH },
    RuleGroup { name: "sleep_extremes", rules: SLEEP_EXTREMES },
    RuleGroup { name: "study_extremes", rules: STUDY_EXTREMES },
    RuleGroup { name: "burnout", rules: BURNOUT },
    RuleGroup { name: "preparation", rules: PREPARATION },
];

/// All advisories that apply to a validated profile.
pub fn input_advisories(profile: &StudentProfile) -> Vec<String> {
    fired(INPUT_ADVISORIES, profile)
        .map(|(_, rule)| rule.then.to_string())
        .collect()
}

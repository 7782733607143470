//! Feature Engineer
//!
//! Pure and deterministic. Every formula here must match the one the
//! estimator was trained with, bit for bit where possible.

use crate::logic::profile::StudentProfile;
use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;

/// Sleep quality step function, peak at 7-9 hours.
pub fn sleep_quality(sleep_hours: f64) -> f64 {
    let s = sleep_hours;
    if (7.0..=9.0).contains(&s) {
        1.0
    } else if (6.0..7.0).contains(&s) || (s > 9.0 && s <= 10.0) {
        0.8
    } else if (5.0..6.0).contains(&s) || (s > 10.0 && s <= 11.0) {
        0.5
    } else if (4.0..5.0).contains(&s) || (s > 11.0 && s <= 12.0) {
        0.2
    } else {
        0.0
    }
}

/// Linear from 3h (0.0) to 9h (1.0), clamped.
pub fn cognitive_capacity(sleep_hours: f64) -> f64 {
    ((sleep_hours - 3.0) / 6.0).clamp(0.0, 1.0)
}

fn flag(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

/// Build the 14-feature vector for a profile.
pub fn engineer_features(profile: &StudentProfile) -> FeatureVector {
    let hours = profile.hours_studied as f64;
    let previous = profile.previous_scores as f64;
    let extra = flag(profile.extracurricular);
    let sleep = profile.sleep_hours as f64;
    let papers = profile.sample_papers as f64;

    let quality = sleep_quality(sleep);

    let values: [f64; FEATURE_COUNT] = [
        hours,
        previous,
        extra,
        sleep,
        papers,
        previous / (hours + 1.0),
        quality,
        (hours / 10.0) * 0.4 + quality * 0.3 + extra * 0.3,
        papers / (hours + 1.0),
        flag(profile.hours_studied > 10 && profile.sleep_hours < 6),
        flag(profile.hours_studied < 3 && profile.sample_papers < 2),
        cognitive_capacity(sleep),
        hours * 0.3 + papers * 2.0 + previous * 0.2,
        hours * quality,
    ];

    FeatureVector::from_values(values)
}

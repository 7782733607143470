//! Student Classifier
//!
//! Input: raw profile + adjusted score. Output: ClassificationResult.
//!
//! Order:
//! 1. Early exits (Critical, return immediately)
//! 2. Accumulating advisories (warnings, recommendations, risk floor)
//! 3. Label selection (first match, fallback Average Student)
//! 4. Performance gap adjustment

use crate::logic::pipeline::round2;
use crate::logic::profile::StudentProfile;
use crate::logic::rules::{fired, first_match};
use super::rules::{ADVISORY_GROUPS, EARLY_EXITS, FALLBACK_CLASS, GAP_RULES, LABEL_RULES};
use super::types::{ClassificationResult, RiskLevel, ScoredProfile, StudentClass};

/// Classify a profile given its corrected score.
///
/// Deterministic: the same (profile, score) always yields the same result.
pub fn classify(profile: &StudentProfile, adjusted_score: f64) -> ClassificationResult {
    let scored = ScoredProfile {
        profile: *profile,
        score: adjusted_score,
    };
    let gap = scored.gap();

    if let Some(rule) = first_match(EARLY_EXITS, profile) {
        log::debug!("Early exit {} -> {}", rule.name, rule.then.class);
        return ClassificationResult {
            classification: rule.then.class,
            risk_level: RiskLevel::Critical,
            warnings: vec![rule.then.warning.to_string()],
            recommendations: vec![rule.then.recommendation.to_string()],
            performance_gap: round2(gap),
        };
    }

    let mut risk_level = RiskLevel::Low;
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    for (group, rule) in fired(ADVISORY_GROUPS, profile) {
        log::trace!("advisory {}/{}", group.name, rule.name);
        warnings.push(rule.then.warning.to_string());
        recommendations.push(rule.then.recommendation.to_string());
        risk_level.escalate(rule.then.risk);
    }

    let classification = select_label(&scored);

    if let Some(rule) = first_match(GAP_RULES, &gap) {
        recommendations.push(rule.then.recommendation.to_string());
        if let Some(floor) = rule.then.risk {
            risk_level.escalate(floor);
        }
    }

    ClassificationResult {
        classification,
        risk_level,
        warnings,
        recommendations,
        performance_gap: round2(gap),
    }
}

/// First matching label, or the fallback.
pub fn select_label(scored: &ScoredProfile) -> StudentClass {
    first_match(LABEL_RULES, scored)
        .map(|rule| rule.then)
        .unwrap_or(FALLBACK_CLASS)
}

// ============================================================================
// TESTS
// ============================================================================

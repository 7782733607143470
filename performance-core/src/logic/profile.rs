//! Student profile - the immutable request input

use serde::{Deserialize, Serialize};

/// Validated input record. Ranges are enforced by `validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Daily study hours (0-24)
    pub hours_studied: u32,
    /// Score of the previous exam (0-100)
    pub previous_scores: u32,
    pub extracurricular: bool,
    /// Nightly sleep hours (0-24)
    pub sleep_hours: u32,
    /// Sample question papers practiced (0-20)
    pub sample_papers: u32,
}

impl StudentProfile {
    pub fn new(
        hours_studied: u32,
        previous_scores: u32,
        extracurricular: bool,
        sleep_hours: u32,
        sample_papers: u32,
    ) -> Self {
        Self {
            hours_studied,
            previous_scores,
            extracurricular,
            sleep_hours,
            sample_papers,
        }
    }

    pub fn previous(&self) -> f64 {
        self.previous_scores as f64
    }

    /// Long study days paired with short nights.
    pub fn is_burnout_pattern(&self) -> bool {
        self.hours_studied > 10 && self.sleep_hours < 6
    }

    pub fn is_unprepared(&self) -> bool {
        self.hours_studied == 0 && self.sample_papers == 0
    }
}

//! Classification Module
//!
//! Turns (profile, adjusted score) into one label, one risk tier and the
//! accumulated warnings and recommendations.
//!
//! ## Structure
//! - `types`: Labels, risk tiers, result record
//! - `rules`: Early exits, advisory groups, label priority list, gap rules
//! - `classifier`: Evaluation order
//!
//! Labels are exclusive (first match). Warnings and recommendations are not:
//! every triggered advisory contributes, and risk only ever escalates.

pub mod types;
pub mod rules;
pub mod classifier;

pub use types::{ClassificationResult, RiskLevel, ScoredProfile, StudentClass};
pub use classifier::{classify, select_label};

//! Validation Module
//!
//! Two passes over the raw request body:
//! - `input`: presence, JSON type and inclusive range per field (fatal)
//! - `advisories`: cross-field plausibility notes (never block)

pub mod input;
pub mod advisories;

pub use input::{validate_input, ProfileInput, ValidatedProfile, ValidationOutcome};
pub use advisories::input_advisories;

//! Constraints Module
//!
//! Plausibility correction of the estimator's raw output.
//!
//! ## Structure
//! - `rules`: Stage tables and adjustment kinds (data only)
//! - `engine`: Cascade interpreter
//!
//! Stages run in a fixed order and compose on the same running value. Within
//! a stage the first matching rule wins. Reordering stages changes results.

pub mod rules;
pub mod engine;

pub use rules::{Adjustment, PreparationTier, Stage, CASCADE};
pub use engine::{correct, correct_with_stages, Correction};

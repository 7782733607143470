//! Input validation
//!
//! Field checks run for every field so the caller sees all problems at once.
//! Range limits are declared on `ProfileInput` and enforced by `validator`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::logic::error::{EngineError, FieldErrors};
use crate::logic::profile::StudentProfile;
use super::advisories::input_advisories;

// ============================================================================
// MESSAGES
// ============================================================================

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INTEGER: &str = "Must be an integer.";
pub const MSG_BOOLEAN: &str = "Must be a boolean.";
pub const MSG_OBJECT: &str = "Expected a JSON object.";

/// Key used for errors that are not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

// ============================================================================
// TYPED INPUT
// ============================================================================

/// Typed request record with declared ranges
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(range(min = 0, max = 24, message = "Must be 0-24"))]
    pub hours_studied: i64,
    #[validate(range(min = 0, max = 100, message = "Must be 0-100"))]
    pub previous_scores: i64,
    pub extracurricular: bool,
    #[validate(range(min = 0, max = 24, message = "Must be 0-24"))]
    pub sleep_hours: i64,
    #[validate(range(min = 0, max = 20, message = "Must be 0-20"))]
    pub sample_papers: i64,
}

impl ProfileInput {
    /// Only call after `validate()` succeeded.
    fn into_profile(self) -> StudentProfile {
        StudentProfile {
            hours_studied: self.hours_studied as u32,
            previous_scores: self.previous_scores as u32,
            extracurricular: self.extracurricular,
            sleep_hours: self.sleep_hours as u32,
            sample_papers: self.sample_papers as u32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Integer,
    Boolean,
}

/// Declared field order
const FIELDS: &[(&str, FieldKind)] = &[
    ("hours_studied", FieldKind::Integer),
    ("previous_scores", FieldKind::Integer),
    ("extracurricular", FieldKind::Boolean),
    ("sleep_hours", FieldKind::Integer),
    ("sample_papers", FieldKind::Integer),
];

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of validating one request body
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Non-empty means the request is rejected
    pub errors: FieldErrors,
    /// Advisory only
    pub warnings: Vec<String>,
    pub profile: Option<StudentProfile>,
}

/// A profile that passed the fatal checks, plus its advisories
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProfile {
    pub profile: StudentProfile,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.profile.is_some()
    }

    pub fn into_result(self) -> Result<ValidatedProfile, EngineError> {
        match (self.profile, self.errors.is_empty()) {
            (Some(profile), true) => Ok(ValidatedProfile {
                profile,
                warnings: self.warnings,
            }),
            (_, false) => Err(EngineError::Validation(self.errors)),
            (None, true) => Err(EngineError::validation(NON_FIELD_ERRORS, MSG_OBJECT)),
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a raw request body.
pub fn validate_input(body: &Value) -> ValidationOutcome {
    let Some(object) = body.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(NON_FIELD_ERRORS.to_string(), MSG_OBJECT.to_string());
        return ValidationOutcome { errors, ..Default::default() };
    };

    let (input, mut errors) = read_fields(object);

    // Range checks; fields that already failed keep their first error.
    if let Err(range_errors) = input.validate() {
        for (field, field_errors) in range_errors.field_errors() {
            let field = field.to_string();
            if errors.contains_key(&field) {
                continue;
            }
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Out of range.".to_string());
            errors.insert(field, message);
        }
    }

    if !errors.is_empty() {
        log::debug!("Rejected input: {:?}", errors);
        return ValidationOutcome { errors, ..Default::default() };
    }

    let profile = input.into_profile();
    let warnings = input_advisories(&profile);

    ValidationOutcome {
        errors,
        warnings,
        profile: Some(profile),
    }
}

/// Presence and type pass. Missing or mistyped fields are left at their
/// default (in range) so the range pass only reports real range problems.
fn read_fields(object: &Map<String, Value>) -> (ProfileInput, FieldErrors) {
    let mut input = ProfileInput::default();
    let mut errors = FieldErrors::new();

    for &(field, kind) in FIELDS {
        let Some(value) = object.get(field) else {
            errors.insert(field.to_string(), MSG_REQUIRED.to_string());
            continue;
        };

        match kind {
            FieldKind::Integer => match as_integer(value) {
                Some(n) => set_integer(&mut input, field, n),
                None => {
                    errors.insert(field.to_string(), MSG_INTEGER.to_string());
                }
            },
            FieldKind::Boolean => match value.as_bool() {
                Some(b) => input.extracurricular = b,
                None => {
                    errors.insert(field.to_string(), MSG_BOOLEAN.to_string());
                }
            },
        }
    }

    (input, errors)
}

/// JSON integers only. Booleans and floats (even `7.0`) are rejected;
/// integers beyond i64 saturate and fail the range pass.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX)),
        _ => None,
    }
}

fn set_integer(input: &mut ProfileInput, field: &str, n: i64) {
    match field {
        "hours_studied" => input.hours_studied = n,
        "previous_scores" => input.previous_scores = n,
        "sleep_hours" => input.sleep_hours = n,
        "sample_papers" => input.sample_papers = n,
        _ => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================

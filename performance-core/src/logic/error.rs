//! Engine errors

use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → message. Ordered so responses are stable.
pub type FieldErrors = BTreeMap<String, String>;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Fatal, field-scoped input errors. Never retried.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Estimator artifact missing, unreadable or built for another feature layout.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Estimator raised (or returned garbage) for a well-formed feature vector.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl EngineError {
    pub fn validation(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        EngineError::Validation(errors)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

//! Form engine errors.

use thiserror::Error;

use super::validation::Rejection;

/// Errors raised by the form registry and submission pipeline.
#[derive(Debug, Error)]
pub enum FormError {
    /// Malformed form or field payload.
    #[error("{0}")]
    InvalidInput(String),

    /// No form with the given identifier.
    #[error("form not found: {0}")]
    NotFound(String),

    /// A submitted value broke a field rule.
    #[error("{0}")]
    ValidationFailed(Rejection),
}

/// Result type alias using FormError.
pub type FormResult<T> = Result<T, FormError>;

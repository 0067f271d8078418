//! Domain-specific error types and error handling.

use sf_shared::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// One or more input fields failed validation
    #[error("Validation failed: {errors}")]
    Validation { errors: ValidationErrors },

    /// A verification code was requested inside the resend cooldown
    #[error("Too many requests, retry in {remaining_seconds} seconds")]
    RateLimited { remaining_seconds: i64 },

    /// The backing store rejected or failed an operation
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// The code delivery collaborator failed
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation { errors }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add_error("age", "must be between 1 and 150", "range");
        errors.add_error("phone", "invalid mobile number", "regex");

        let error: DomainError = errors.into();
        let message = error.to_string();
        assert!(message.contains("age"));
        assert!(message.contains("phone"));
    }

    #[test]
    fn test_rate_limited_message() {
        let error = DomainError::RateLimited {
            remaining_seconds: 42,
        };
        assert!(error.to_string().contains("42 seconds"));
    }
}

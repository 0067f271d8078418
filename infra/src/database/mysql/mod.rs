//! MySQL repository implementations

pub mod form_schema_repository_impl;
pub mod submission_repository_impl;
pub mod verification_code_repository_impl;

pub use form_schema_repository_impl::MySqlFormSchemaRepository;
pub use submission_repository_impl::MySqlSubmissionRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use sf_core::errors::DomainError;

/// Wrap a SQLx failure as a storage error naming the attempted action
pub(crate) fn storage_error(action: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "Failed to {}", action);
    DomainError::Storage {
        message: format!("Failed to {}: {}", action, error),
    }
}

/// Column decoding failure
pub(crate) fn column_error(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, error),
    }
}

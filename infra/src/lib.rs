//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and delivery traits defined in
//! `sf_core`:
//!
//! - **Database**: MySQL repositories using SQLx behind a lazily created pool
//! - **SMS**: verification code delivery via HTTP push or the console

use std::sync::Arc;

use sf_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Verification code delivery channels
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A shared connection attempt failed; every waiter receives the same cause
    #[error(transparent)]
    Connect(Arc<InfrastructureError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS delivery error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Storage {
            message: error.to_string(),
        }
    }
}

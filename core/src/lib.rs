//! # Simple Form Core
//!
//! Core business logic and domain layer for the Simple Form backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types. Persistence and SMS delivery are reached only through the
//! traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    FieldType, FormField, FormSchema, Submission, SubmissionInput, VerificationCode,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
pub use services::{
    CodeCleanupConfig, CodeCleanupService, CodeDeliveryTrait, FormService, SendCodeResult,
    SendPermit, SubmissionService, SubmissionSummary, SubmitOutcome, VerificationService,
    LATEST_SUBMISSIONS_LIMIT,
};

//! Repository interfaces for persistence, with in-memory implementations
//! used by tests and local development.

pub mod form_schema;
pub mod submission;
pub mod verification_code;

pub use form_schema::FormSchemaRepository;
pub use submission::SubmissionRepository;
pub use verification_code::VerificationCodeRepository;

/// In-memory repositories
pub mod mock {
    pub use super::form_schema::MockFormSchemaRepository;
    pub use super::submission::MockSubmissionRepository;
    pub use super::verification_code::MockVerificationCodeRepository;
}

//! Domain entities representing core business objects.

pub mod form_schema;
pub mod submission;
pub mod verification_code;

// Re-export commonly used types
pub use form_schema::{FieldType, FormField, FormSchema};
pub use submission::{ExtraData, Submission, SubmissionInput, GENDER_OPTIONS};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, EXPIRATION_MINUTES, RESEND_COOLDOWN_SECONDS,
};

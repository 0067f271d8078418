//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod form;
pub mod submission;
pub mod verification;

// Re-export commonly used types
pub use cleanup::{CodeCleanupConfig, CodeCleanupService};
pub use form::{FormService, LATEST_SUBMISSIONS_LIMIT};
pub use submission::{SubmissionService, SubmissionSummary, SubmitOutcome};
pub use verification::{
    CodeDeliveryTrait, MockCodeDelivery, SendCodeResult, SendPermit, VerificationService,
};

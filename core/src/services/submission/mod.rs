//! Form submission handling with upsert by identity number

mod service;
mod types;


pub use service::SubmissionService;
pub use types::{SubmissionSummary, SubmitOutcome};

#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockSubmissionRepository;
pub use trait_::SubmissionRepository;

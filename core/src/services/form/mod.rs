mod service;

pub use service::{FormService, LATEST_SUBMISSIONS_LIMIT};

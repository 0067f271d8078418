//! Shared handler helpers

pub mod client_ip;
pub mod error;

pub use client_ip::extract_client_ip;
pub use error::{domain_error_response, json_config, validation_failure};

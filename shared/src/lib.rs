//! Shared utilities and common types for the Simple Form server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The response envelope
//! - Utility functions (phone and ID card validation, field errors)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig, SmsConfig};
pub use types::ApiResponse;
pub use utils::{id_card, phone, validation};

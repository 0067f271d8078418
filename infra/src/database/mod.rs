//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management with lazy, single-flight initialisation
//! - Repository implementations for verification codes, submissions and
//!   form schemas
//! - Schema migrations under `migrations/`

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, LazyDatabase, PoolStatistics};
pub use mysql::{
    MySqlFormSchemaRepository, MySqlSubmissionRepository, MySqlVerificationCodeRepository,
};

//! Configuration module with area-specific sub-modules
//!
//! - `database` - Database connection and pool configuration
//! - `environment` - Execution mode detection
//! - `server` - HTTP server binding
//! - `sms` - Verification code delivery and cleanup

pub mod database;
pub mod environment;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Execution mode
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// SMS delivery configuration
    #[serde(default)]
    pub sms: SmsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Call `dotenvy::dotenv()` beforehand if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            sms: SmsConfig::from_env(),
        }
    }
}

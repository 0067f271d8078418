//! Verification code delivery configuration

use serde::{Deserialize, Serialize};

/// SMS delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Push endpoint receiving `code` and `targets` query parameters.
    /// When unset, codes are written to the log instead.
    #[serde(default)]
    pub push_url: Option<String>,

    /// Timeout for the push request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How often expired codes are swept from storage, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            push_url: None,
            request_timeout_secs: default_request_timeout(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            push_url: std::env::var("SMS_PUSH_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            request_timeout_secs: std::env::var("SMS_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            cleanup_interval_secs: std::env::var("CODE_CLEANUP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval_secs),
        }
    }

    /// Point delivery at a push endpoint
    pub fn with_push_url(mut self, url: impl Into<String>) -> Self {
        self.push_url = Some(url.into());
        self
    }
}

fn default_request_timeout() -> u64 {
    10
}

fn default_cleanup_interval() -> u64 {
    60
}

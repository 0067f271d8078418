//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the resend cooldown check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPermit {
    /// Whether a new code may be sent now
    pub allowed: bool,
    /// Seconds until the next send is allowed, when denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<i64>,
}

impl SendPermit {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            remaining_seconds: None,
        }
    }

    pub fn denied(remaining_seconds: i64) -> Self {
        Self {
            allowed: false,
            remaining_seconds: Some(remaining_seconds.max(0)),
        }
    }
}

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The code that was stored and dispatched
    pub code: String,
    /// The delivery provider's message ID
    pub message_id: String,
    /// When the stored code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}

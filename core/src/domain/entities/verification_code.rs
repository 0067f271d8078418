//! Verification code entity for SMS-based phone confirmation.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued; codes are never zero-padded
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Lifetime of a verification code
pub const EXPIRATION_MINUTES: i64 = 5;

/// Minimum interval between two codes sent to the same phone
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// A one-time code issued to a phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Phone number this code was sent to
    pub phone: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been consumed or superseded
    pub used: bool,
}

impl VerificationCode {
    /// Creates a fresh, unused code for `phone` valid for [`EXPIRATION_MINUTES`]
    pub fn new(phone: impl Into<String>, code: impl Into<String>) -> Self {
        Self::issued_at(phone, code, Utc::now())
    }

    /// Creates a code as if it had been issued at `created_at`
    pub fn issued_at(phone: impl Into<String>, code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            code: code.into(),
            created_at,
            expires_at: created_at + Duration::minutes(EXPIRATION_MINUTES),
            used: false,
        }
    }

    /// Generates a uniformly random code in `[CODE_MIN, CODE_MAX]`
    pub fn generate_code() -> String {
        let code: u32 = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks if the code has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Checks if the code can still be consumed at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired_at(now)
    }

    /// Seconds left before another code may be sent, or `None` once the
    /// cooldown has elapsed. Rounded up and kept within `1..=RESEND_COOLDOWN_SECONDS`
    /// even when the store clock runs ahead of ours.
    pub fn resend_cooldown_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        let elapsed_ms = (now - self.created_at).num_milliseconds();
        let remaining_ms = RESEND_COOLDOWN_SECONDS * 1000 - elapsed_ms;
        if remaining_ms <= 0 {
            return None;
        }
        // ceil for positive integers
        Some(((remaining_ms + 999) / 1000).min(RESEND_COOLDOWN_SECONDS))
    }

    /// Marks the code as used
    pub fn mark_as_used(&mut self) {
        self.used = true;
    }
}

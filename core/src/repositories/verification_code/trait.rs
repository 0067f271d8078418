//! Verification code repository trait.
//!
//! The backing store is expected to provide atomic single-row updates and
//! indexed lookup by phone. Expired rows are removed by `delete_expired`,
//! which the cleanup task calls periodically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for verification code persistence
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new code
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Mark every unused code for `phone` as used
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of codes that were invalidated
    async fn invalidate_unused(&self, phone: &str) -> Result<u64, DomainError>;

    /// Most recent code for `phone` created at or after `since`, regardless of
    /// its used state
    async fn find_latest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// An unused code matching `phone` and `code` whose expiry is after `now`
    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Atomically flip a code from unused to used
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the code
    /// * `Ok(false)` - The code was already used or no longer exists
    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete codes whose expiry is at or before `now`, used or not
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

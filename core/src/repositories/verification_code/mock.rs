//! In-memory implementation of VerificationCodeRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Mock verification code repository for testing
#[derive(Default)]
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<Vec<VerificationCode>>>,
    fail: AtomicBool,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Insert a record as-is, bypassing the service
    pub async fn insert_raw(&self, code: VerificationCode) {
        self.codes.write().await.push(code);
    }

    /// Snapshot of all stored records for `phone`
    pub async fn codes_for(&self, phone: &str) -> Vec<VerificationCode> {
        self.codes
            .read()
            .await
            .iter()
            .filter(|c| c.phone == phone)
            .cloned()
            .collect()
    }

    /// Total number of stored records
    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("mock verification code store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        self.check()?;
        self.codes.write().await.push(code.clone());
        Ok(code)
    }

    async fn invalidate_unused(&self, phone: &str) -> Result<u64, DomainError> {
        self.check()?;
        let mut codes = self.codes.write().await;
        let mut count = 0;
        for code in codes.iter_mut().filter(|c| c.phone == phone && !c.used) {
            code.mark_as_used();
            count += 1;
        }
        Ok(count)
    }

    async fn find_latest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        self.check()?;
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.phone == phone && c.created_at >= since)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        self.check()?;
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .find(|c| c.phone == phone && c.code == code && c.is_active_at(now))
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check()?;
        let mut codes = self.codes.write().await;
        match codes.iter_mut().find(|c| c.id == id && !c.used) {
            Some(code) => {
                code.mark_as_used();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check()?;
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|c| !c.is_expired_at(now));
        Ok((before - codes.len()) as u64)
    }
}

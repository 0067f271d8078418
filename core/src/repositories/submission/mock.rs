//! In-memory implementation of SubmissionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::submission::{Submission, SubmissionInput};
use crate::errors::DomainError;

use super::trait_::SubmissionRepository;

/// Mock submission repository for testing
#[derive(Default)]
pub struct MockSubmissionRepository {
    records: Arc<RwLock<Vec<Submission>>>,
    fail: AtomicBool,
}

impl MockSubmissionRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored records in insertion order
    pub async fn all(&self) -> Vec<Submission> {
        self.records.read().await.clone()
    }

    /// Total number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("mock submission store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MockSubmissionRepository {
    async fn exists_by_id_card(&self, id_card: &str) -> Result<bool, DomainError> {
        self.check()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .any(|r| r.id_card.as_deref().is_some_and(|key| key.eq_ignore_ascii_case(id_card))))
    }

    async fn upsert_by_id_card(
        &self,
        id_card: &str,
        input: &SubmissionInput,
        ip_address: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, DomainError> {
        self.check()?;
        // Single write lock makes find-and-modify atomic
        let mut records = self.records.write().await;

        if let Some(existing) = records
            .iter_mut()
            .find(|r| r.id_card.as_deref().is_some_and(|key| key.eq_ignore_ascii_case(id_card)))
        {
            existing.apply_update(input, ip_address, submitted_at);
            return Ok(existing.clone());
        }

        let mut input = input.clone();
        input.id_card = Some(id_card.to_string());
        let record = Submission::from_input(input, ip_address, submitted_at);
        records.push(record.clone());
        Ok(record)
    }

    async fn insert(&self, submission: Submission) -> Result<Submission, DomainError> {
        self.check()?;
        self.records.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn find_latest(&self, limit: u32) -> Result<Vec<Submission>, DomainError> {
        self.check()?;
        let mut records = self.records.read().await.clone();
        // Stable sort keeps later inserts first among equal timestamps
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }
}

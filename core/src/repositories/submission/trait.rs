//! Submission repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::submission::{Submission, SubmissionInput};
use crate::errors::DomainError;

/// Repository trait for submitted form data
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Whether a record with this natural key already exists.
    ///
    /// Advisory only: a concurrent submit may create the record between this
    /// check and the upsert.
    async fn exists_by_id_card(&self, id_card: &str) -> Result<bool, DomainError>;

    /// Atomically update the record keyed by `id_card`, or insert one.
    ///
    /// On update only the fields present in `input` are written, together
    /// with `ip_address`, `submitted_at` and `updated_at`.
    ///
    /// # Returns
    /// * `Ok(Submission)` - The record as stored after the write
    async fn upsert_by_id_card(
        &self,
        id_card: &str,
        input: &SubmissionInput,
        ip_address: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, DomainError>;

    /// Insert a record without any deduplication
    async fn insert(&self, submission: Submission) -> Result<Submission, DomainError>;

    /// Most recently created records, newest first
    async fn find_latest(&self, limit: u32) -> Result<Vec<Submission>, DomainError>;
}

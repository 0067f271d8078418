use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;

use sf_shared::id_card::mask_id_card;

use crate::domain::entities::submission::{Submission, SubmissionInput};
use crate::errors::DomainResult;
use crate::repositories::SubmissionRepository;

use super::types::{SubmissionSummary, SubmitOutcome};

/// Validates submissions and writes them with upsert-by-natural-key semantics
pub struct SubmissionService<R: SubmissionRepository> {
    repository: Arc<R>,
}

impl<R: SubmissionRepository> SubmissionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate `raw` and store it.
    ///
    /// With a non-empty `idCard` the record sharing that key is overwritten
    /// field by field, or created if none exists. Without one a new record is
    /// always inserted.
    ///
    /// # Returns
    /// * `Ok(SubmitOutcome)` - Stored record id, submission time and whether
    ///   an existing record was updated
    /// * `Err(DomainError::Validation)` - Every failing field, nothing written
    /// * `Err(DomainError::Storage)` - The store failed
    pub async fn submit(&self, raw: &Map<String, Value>, client_ip: &str) -> DomainResult<SubmitOutcome> {
        let input = SubmissionInput::from_raw(raw).map_err(|errors| {
            tracing::warn!(
                fields = ?errors.fields(),
                event = "submission_rejected",
                "Submission failed validation"
            );
            errors
        })?;
        let now = Utc::now();

        let Some(id_card) = input.natural_key().map(str::to_owned) else {
            let record = self
                .repository
                .insert(Submission::from_input(input, client_ip, now))
                .await?;
            tracing::info!(
                submission_id = %record.id,
                event = "submission_created",
                "Stored anonymous submission"
            );
            return Ok(SubmitOutcome {
                id: record.id,
                submitted_at: record.submitted_at,
                is_update: false,
            });
        };

        let is_update = self.repository.exists_by_id_card(&id_card).await?;
        let record = self
            .repository
            .upsert_by_id_card(&id_card, &input, client_ip, now)
            .await?;

        let event = if is_update { "submission_updated" } else { "submission_created" };
        tracing::info!(
            submission_id = %record.id,
            id_card = %mask_id_card(&id_card),
            is_update = is_update,
            event = event,
            "Stored submission"
        );

        Ok(SubmitOutcome {
            id: record.id,
            submitted_at: record.submitted_at,
            is_update,
        })
    }

    /// Most recently created submissions, newest first
    pub async fn latest(&self, limit: u32) -> DomainResult<Vec<SubmissionSummary>> {
        let records = self.repository.find_latest(limit).await?;
        Ok(records.into_iter().map(SubmissionSummary::from).collect())
    }
}

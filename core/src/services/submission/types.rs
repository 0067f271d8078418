use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::submission::Submission;

/// Result of a submit call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Whether an existing record was overwritten. Advisory under concurrency.
    pub is_update: bool,
}

/// Public projection of a stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub id_card: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionSummary {
    fn from(record: Submission) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            gender: record.gender,
            phone: record.phone,
            id_card: record.id_card,
            submitted_at: record.submitted_at,
            created_at: record.created_at,
        }
    }
}

//! MySQL implementation of the SubmissionRepository trait.
//!
//! Upserts rely on the unique index over `id_card`: `INSERT ... ON DUPLICATE
//! KEY UPDATE` either creates the row or overwrites the provided columns in a
//! single statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use sf_core::domain::entities::submission::{ExtraData, Submission, SubmissionInput};
use sf_core::errors::DomainError;
use sf_core::repositories::SubmissionRepository;

use super::{column_error, storage_error};
use crate::database::connection::LazyDatabase;

const SELECT_COLUMNS: &str = "SELECT id, id_card, name, age, gender, phone, address, extra_data, \
     ip_address, submitted_at, created_at, updated_at FROM user_data";

/// MySQL implementation of SubmissionRepository
pub struct MySqlSubmissionRepository {
    db: Arc<LazyDatabase>,
}

impl MySqlSubmissionRepository {
    pub fn new(db: Arc<LazyDatabase>) -> Self {
        Self { db }
    }

    async fn pool(&self) -> Result<&MySqlPool, DomainError> {
        Ok(self.db.pool().await?.get_pool())
    }

    fn encode_extra_data(extra_data: &ExtraData) -> Result<String, DomainError> {
        serde_json::to_string(extra_data).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode extra_data: {}", e),
        })
    }

    fn row_to_submission(row: &sqlx::mysql::MySqlRow) -> Result<Submission, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let age: Option<i32> = row.try_get("age").map_err(|e| column_error("age", e))?;
        let extra_data: String = row
            .try_get("extra_data")
            .map_err(|e| column_error("extra_data", e))?;

        Ok(Submission {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            id_card: row.try_get("id_card").map_err(|e| column_error("id_card", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            age: age.map(i64::from),
            gender: row.try_get("gender").map_err(|e| column_error("gender", e))?,
            phone: row.try_get("phone").map_err(|e| column_error("phone", e))?,
            address: row.try_get("address").map_err(|e| column_error("address", e))?,
            extra_data: serde_json::from_str(&extra_data).map_err(|e| column_error("extra_data", e))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| column_error("ip_address", e))?,
            submitted_at: row
                .try_get::<DateTime<Utc>, _>("submitted_at")
                .map_err(|e| column_error("submitted_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    async fn find_by_id_card(&self, id_card: &str) -> Result<Option<Submission>, DomainError> {
        let query = format!("{} WHERE id_card = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id_card)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| storage_error("find submission by id card", e))?;

        row.as_ref().map(Self::row_to_submission).transpose()
    }
}

#[async_trait]
impl SubmissionRepository for MySqlSubmissionRepository {
    async fn exists_by_id_card(&self, id_card: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM user_data WHERE id_card = ?) AS found")
            .bind(id_card)
            .fetch_one(self.pool().await?)
            .await
            .map_err(|e| storage_error("check submission existence", e))?;

        let found: i64 = row.try_get("found").map_err(|e| column_error("found", e))?;
        Ok(found == 1)
    }

    async fn upsert_by_id_card(
        &self,
        id_card: &str,
        input: &SubmissionInput,
        ip_address: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, DomainError> {
        // Insert branch applies defaults; update branch keeps columns the
        // input leaves out
        let query = r#"
            INSERT INTO user_data (
                id, id_card, name, age, gender, phone, address, extra_data,
                ip_address, submitted_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = COALESCE(?, name),
                age = COALESCE(?, age),
                gender = COALESCE(?, gender),
                phone = COALESCE(?, phone),
                address = COALESCE(?, address),
                extra_data = COALESCE(?, extra_data),
                ip_address = ?,
                submitted_at = ?,
                updated_at = ?
        "#;

        let provided_extra = input
            .extra_data
            .as_ref()
            .map(Self::encode_extra_data)
            .transpose()?;
        let insert_extra = match &provided_extra {
            Some(encoded) => encoded.clone(),
            None => Self::encode_extra_data(&ExtraData::new())?,
        };

        sqlx::query(query)
            // insert values
            .bind(Uuid::new_v4().to_string())
            .bind(id_card)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(insert_extra)
            .bind(ip_address)
            .bind(submitted_at)
            .bind(submitted_at)
            .bind(submitted_at)
            // update values
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(provided_extra)
            .bind(ip_address)
            .bind(submitted_at)
            .bind(submitted_at)
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("upsert submission", e))?;

        self.find_by_id_card(id_card).await?.ok_or_else(|| DomainError::Storage {
            message: "Upserted submission could not be read back".to_string(),
        })
    }

    async fn insert(&self, submission: Submission) -> Result<Submission, DomainError> {
        let query = r#"
            INSERT INTO user_data (
                id, id_card, name, age, gender, phone, address, extra_data,
                ip_address, submitted_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(submission.id.to_string())
            .bind(&submission.id_card)
            .bind(&submission.name)
            .bind(submission.age)
            .bind(&submission.gender)
            .bind(&submission.phone)
            .bind(&submission.address)
            .bind(Self::encode_extra_data(&submission.extra_data)?)
            .bind(&submission.ip_address)
            .bind(submission.submitted_at)
            .bind(submission.created_at)
            .bind(submission.updated_at)
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("insert submission", e))?;

        Ok(submission)
    }

    async fn find_latest(&self, limit: u32) -> Result<Vec<Submission>, DomainError> {
        let query = format!("{} ORDER BY created_at DESC LIMIT ?", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(limit)
            .fetch_all(self.pool().await?)
            .await
            .map_err(|e| storage_error("load latest submissions", e))?;

        rows.iter().map(Self::row_to_submission).collect()
    }
}

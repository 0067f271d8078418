//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use sf_core::domain::entities::verification_code::VerificationCode;
use sf_core::errors::DomainError;
use sf_core::repositories::VerificationCodeRepository;
use sf_shared::phone::mask_phone_number;

use super::{column_error, storage_error};
use crate::database::connection::LazyDatabase;

const SELECT_COLUMNS: &str = "SELECT id, phone, code, created_at, expires_at, used FROM verification_codes";

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    db: Arc<LazyDatabase>,
}

impl MySqlVerificationCodeRepository {
    pub fn new(db: Arc<LazyDatabase>) -> Self {
        Self { db }
    }

    async fn pool(&self) -> Result<&MySqlPool, DomainError> {
        Ok(self.db.pool().await?.get_pool())
    }

    /// Convert database row to VerificationCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            phone: row.try_get("phone").map_err(|e| column_error("phone", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            used: row.try_get("used").map_err(|e| column_error("used", e))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO verification_codes (id, phone, code, created_at, expires_at, used)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.phone)
            .bind(&code.code)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.used)
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("create verification code", e))?;

        tracing::debug!(
            phone = %mask_phone_number(&code.phone),
            code_id = %code.id,
            "Inserted verification code"
        );
        Ok(code)
    }

    async fn invalidate_unused(&self, phone: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE verification_codes SET used = TRUE WHERE phone = ? AND used = FALSE")
            .bind(phone)
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("invalidate verification codes", e))?;

        Ok(result.rows_affected())
    }

    async fn find_latest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "{} WHERE phone = ? AND created_at >= ? ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(phone)
            .bind(since)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| storage_error("find recent verification code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "{} WHERE phone = ? AND code = ? AND used = FALSE AND expires_at > ? \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(phone)
            .bind(code)
            .bind(now)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| storage_error("find active verification code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        // The used = FALSE guard makes the flip a compare-and-set
        let result = sqlx::query("UPDATE verification_codes SET used = TRUE WHERE id = ? AND used = FALSE")
            .bind(id.to_string())
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("mark verification code used", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool().await?)
            .await
            .map_err(|e| storage_error("delete expired verification codes", e))?;

        Ok(result.rows_affected())
    }
}

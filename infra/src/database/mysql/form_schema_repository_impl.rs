//! MySQL implementation of the FormSchemaRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::Row;
use std::sync::Arc;
use uuid::Uuid;

use sf_core::domain::entities::form_schema::{FormField, FormSchema};
use sf_core::errors::DomainError;
use sf_core::repositories::FormSchemaRepository;

use super::{column_error, storage_error};
use crate::database::connection::LazyDatabase;

/// MySQL implementation of FormSchemaRepository
pub struct MySqlFormSchemaRepository {
    db: Arc<LazyDatabase>,
}

impl MySqlFormSchemaRepository {
    pub fn new(db: Arc<LazyDatabase>) -> Self {
        Self { db }
    }

    fn row_to_schema(row: &sqlx::mysql::MySqlRow) -> Result<FormSchema, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let Json(fields) = row
            .try_get::<Json<Vec<FormField>>, _>("fields")
            .map_err(|e| column_error("fields", e))?;

        Ok(FormSchema {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            version: row.try_get("version").map_err(|e| column_error("version", e))?,
            fields,
            is_active: row.try_get("is_active").map_err(|e| column_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl FormSchemaRepository for MySqlFormSchemaRepository {
    async fn find_current(&self) -> Result<Option<FormSchema>, DomainError> {
        let query = r#"
            SELECT id, version, fields, is_active, created_at, updated_at
            FROM form_schemas
            WHERE is_active = TRUE
            ORDER BY updated_at DESC
            LIMIT 1
        "#;

        let pool = self.db.pool().await?;
        let row = sqlx::query(query)
            .fetch_optional(pool.get_pool())
            .await
            .map_err(|e| storage_error("load current form schema", e))?;

        row.as_ref().map(Self::row_to_schema).transpose()
    }
}

//! In-memory implementation of FormSchemaRepository

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::form_schema::FormSchema;
use crate::errors::DomainError;

use super::trait_::FormSchemaRepository;

/// Mock form schema repository for testing
#[derive(Default)]
pub struct MockFormSchemaRepository {
    schemas: Arc<RwLock<Vec<FormSchema>>>,
    fail: AtomicBool,
}

impl MockFormSchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `schemas`
    pub fn with_schemas(schemas: Vec<FormSchema>) -> Self {
        Self {
            schemas: Arc::new(RwLock::new(schemas)),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FormSchemaRepository for MockFormSchemaRepository {
    async fn find_current(&self) -> Result<Option<FormSchema>, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("mock form schema store unavailable"));
        }
        let schemas = self.schemas.read().await;
        Ok(schemas
            .iter()
            .filter(|s| s.is_active)
            .max_by_key(|s| s.updated_at)
            .cloned())
    }
}

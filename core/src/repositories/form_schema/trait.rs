use async_trait::async_trait;

use crate::domain::entities::form_schema::FormSchema;
use crate::errors::DomainError;

/// Read access to stored form definitions
#[async_trait]
pub trait FormSchemaRepository: Send + Sync {
    /// The most recently updated active schema, if any
    async fn find_current(&self) -> Result<Option<FormSchema>, DomainError>;
}

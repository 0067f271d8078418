use std::sync::Arc;

use crate::domain::entities::form_schema::FormSchema;
use crate::errors::DomainResult;
use crate::repositories::FormSchemaRepository;

/// Number of submissions returned by the "latest" listing
pub const LATEST_SUBMISSIONS_LIMIT: u32 = 5;

/// Serves the current form definition
pub struct FormService<F: FormSchemaRepository> {
    repository: Arc<F>,
}

impl<F: FormSchemaRepository> FormService<F> {
    pub fn new(repository: Arc<F>) -> Self {
        Self { repository }
    }

    /// The current active schema with fields sorted by `order`, or the
    /// built-in definition when none is stored
    pub async fn definition(&self) -> DomainResult<FormSchema> {
        match self.repository.find_current().await? {
            Some(mut schema) => {
                schema.fields = schema.sorted_fields();
                Ok(schema)
            }
            None => {
                tracing::debug!("No active form schema stored, serving built-in definition");
                Ok(FormSchema::fallback())
            }
        }
    }
}

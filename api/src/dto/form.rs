use serde::{Deserialize, Serialize};

use sf_core::domain::entities::form_schema::{FormField, FormSchema};

/// Body of `GET /api/form/definition`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinitionResponse {
    pub version: String,
    pub fields: Vec<FormField>,
}

impl From<FormSchema> for FormDefinitionResponse {
    fn from(schema: FormSchema) -> Self {
        Self {
            version: schema.version,
            fields: schema.fields,
        }
    }
}

//! `/api/form` - form definition and submission endpoints

pub mod definition;
pub mod latest;
pub mod submit;

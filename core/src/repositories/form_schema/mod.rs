#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockFormSchemaRepository;
pub use trait_::FormSchemaRepository;

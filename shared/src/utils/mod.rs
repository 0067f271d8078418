//! Common utility functions

pub mod id_card;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use id_card::*;
pub use phone::*;
pub use validation::*;

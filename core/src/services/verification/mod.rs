//! Verification code workflow for phone confirmation
//!
//! This module provides:
//! - Per-phone resend cooldown
//! - Code generation, storage and delivery
//! - One-time verification

mod mock;
mod service;
mod traits;
mod types;


pub use mock::MockCodeDelivery;
pub use service::VerificationService;
pub use traits::CodeDeliveryTrait;
pub use types::{SendCodeResult, SendPermit};

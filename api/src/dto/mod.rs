//! Request and response bodies

pub mod form;
pub mod sms;

pub use form::FormDefinitionResponse;
pub use sms::{RateLimitedResponse, SendCodeRequest, SendCodeResponse, VerifyCodeRequest};

//! Verification code delivery
//!
//! - **Push**: HTTP GET to a configured endpoint with `code` and `targets`
//!   query parameters
//! - **Console**: prints the code for local development when no endpoint is
//!   configured

use async_trait::async_trait;

use sf_core::services::verification::CodeDeliveryTrait;
use sf_shared::SmsConfig;

use crate::InfrastructureError;

pub mod console_delivery;
pub mod push_delivery;

pub use console_delivery::ConsoleCodeDelivery;
pub use push_delivery::PushCodeDelivery;

#[cfg(test)]
mod tests;

/// Delivery channel selected from configuration
pub enum SmsDelivery {
    Console(ConsoleCodeDelivery),
    Push(PushCodeDelivery),
}

#[async_trait]
impl CodeDeliveryTrait for SmsDelivery {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        match self {
            SmsDelivery::Console(delivery) => delivery.send_verification_code(phone, code).await,
            SmsDelivery::Push(delivery) => delivery.send_verification_code(phone, code).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            SmsDelivery::Console(delivery) => delivery.provider_name(),
            SmsDelivery::Push(delivery) => delivery.provider_name(),
        }
    }
}

/// Create the delivery channel described by `config`
///
/// Uses the push endpoint when `push_url` is set, otherwise the console.
pub fn create_code_delivery(config: &SmsConfig) -> Result<SmsDelivery, InfrastructureError> {
    match config.push_url.as_deref() {
        Some(url) => {
            tracing::info!("Verification codes will be delivered via push endpoint");
            Ok(SmsDelivery::Push(PushCodeDelivery::new(url, config.request_timeout_secs)?))
        }
        None => {
            tracing::warn!("SMS_PUSH_URL not configured, verification codes are written to the console");
            Ok(SmsDelivery::Console(ConsoleCodeDelivery::new()))
        }
    }
}

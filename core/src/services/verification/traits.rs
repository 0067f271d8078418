//! Trait for code delivery integration

use async_trait::async_trait;

/// Channel that carries a verification code to the phone owner
#[async_trait]
pub trait CodeDeliveryTrait: Send + Sync {
    /// Deliver `code` to `phone`
    ///
    /// # Returns
    /// * `Ok(String)` - Provider-side message identifier
    /// * `Err(String)` - Description of the delivery failure
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;

    /// Short name of the delivery channel, used in logs
    fn provider_name(&self) -> &'static str;
}

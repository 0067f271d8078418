//! HTTP push delivery
//!
//! Sends `GET <push_url>?code=<code>&targets=<phone>`. Any non-success status
//! is treated as a failed delivery.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{error, info};

use sf_core::services::verification::CodeDeliveryTrait;
use sf_shared::phone::mask_phone_number;

use crate::InfrastructureError;

/// Delivers codes through an HTTP push endpoint
#[derive(Clone)]
pub struct PushCodeDelivery {
    client: Client,
    endpoint: Url,
}

impl PushCodeDelivery {
    /// Create a push delivery for `endpoint`
    ///
    /// # Errors
    /// Returns `InfrastructureError::Config` if the URL does not parse.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, InfrastructureError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMS_PUSH_URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint URL with `code` and `targets` set, replacing any existing
    /// values for those keys
    pub fn request_url(&self, phone: &str, code: &str) -> Url {
        let mut url = self.endpoint.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| *key != "code" && *key != "targets")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("code", code)
            .append_pair("targets", phone);
        url
    }

    async fn push(&self, phone: &str, code: &str) -> Result<(), InfrastructureError> {
        let response = self.client.get(self.request_url(phone, code)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Sms(format!(
                "push endpoint returned {}: {}",
                status, body
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CodeDeliveryTrait for PushCodeDelivery {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        match self.push(phone, code).await {
            Ok(()) => {
                let message_id = format!("push_{}", uuid::Uuid::new_v4());
                info!(
                    target: "sms_service",
                    provider = "push",
                    phone = %mask_phone_number(phone),
                    message_id = %message_id,
                    "Verification code pushed"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "sms_service",
                    provider = "push",
                    phone = %mask_phone_number(phone),
                    error = %e,
                    "Verification code push failed"
                );
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "push"
    }
}

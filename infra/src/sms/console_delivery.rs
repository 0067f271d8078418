//! Console delivery for development
//!
//! Writes verification codes to stdout instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use sf_core::domain::entities::verification_code::EXPIRATION_MINUTES;
use sf_core::services::verification::CodeDeliveryTrait;
use sf_shared::phone::mask_phone_number;

/// Prints codes to the console
#[derive(Clone)]
pub struct ConsoleCodeDelivery {
    /// Number of codes printed so far
    message_count: Arc<AtomicU64>,
    /// Whether to print to stdout; the structured log line is always emitted
    console_output: bool,
}

impl ConsoleCodeDelivery {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: true,
        }
    }

    /// Log only, without the stdout banner
    pub fn quiet() -> Self {
        Self {
            console_output: false,
            ..Self::new()
        }
    }

    /// Get the total number of codes delivered
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleCodeDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeDeliveryTrait for ConsoleCodeDelivery {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(48));
            println!("📱 VERIFICATION CODE #{}", count);
            println!("{}", "=".repeat(48));
            println!("Phone:    {}", phone);
            println!("Code:     {}", code);
            println!("Expires:  in {} minutes", EXPIRATION_MINUTES);
            println!("{}\n", "=".repeat(48));
        }

        info!(
            target: "sms_service",
            provider = "console",
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "Verification code written to console"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &'static str {
        "console"
    }
}

//! Integration tests for the send/verify flow through the public API

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use sf_core::repositories::mock::MockVerificationCodeRepository;
    use sf_core::services::{CodeCleanupConfig, CodeCleanupService};
    use sf_core::services::verification::{CodeDeliveryTrait, VerificationService};
    use sf_core::DomainError;

    // Delivery channel that keeps an ordered outbox
    struct OutboxDelivery {
        outbox: Mutex<Vec<(String, String)>>,
    }

    impl OutboxDelivery {
        fn new() -> Self {
            Self {
                outbox: Mutex::new(Vec::new()),
            }
        }

        async fn last_code(&self) -> Option<String> {
            self.outbox.lock().await.last().map(|(_, code)| code.clone())
        }
    }

    #[async_trait]
    impl CodeDeliveryTrait for OutboxDelivery {
        async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
            let mut outbox = self.outbox.lock().await;
            outbox.push((phone.to_string(), code.to_string()));
            Ok(format!("outbox-{}", outbox.len()))
        }

        fn provider_name(&self) -> &'static str {
            "outbox"
        }
    }

    #[tokio::test]
    async fn test_send_then_verify_round() {
        let repository = Arc::new(MockVerificationCodeRepository::new());
        let delivery = Arc::new(OutboxDelivery::new());
        let service = VerificationService::new(repository.clone(), delivery.clone());

        let sent = service.send_code("13812345678").await.unwrap();
        assert_eq!(sent.message_id, "outbox-1");
        assert_eq!(delivery.last_code().await, Some(sent.code.clone()));

        // Denied resend does not disturb the pending code
        assert!(matches!(
            service.send_code("13812345678").await,
            Err(DomainError::RateLimited { .. })
        ));

        assert!(service.verify("13812345678", &sent.code).await.unwrap());
        assert!(!service.verify("13812345678", &sent.code).await.unwrap());
    }

    #[tokio::test]
    async fn test_cleanup_keeps_live_codes() {
        let repository = Arc::new(MockVerificationCodeRepository::new());
        let service = VerificationService::new(repository.clone(), Arc::new(OutboxDelivery::new()));
        let sent = service.send_code("13812345678").await.unwrap();

        let cleanup = CodeCleanupService::new(repository.clone(), CodeCleanupConfig::default());
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);

        assert!(service.verify("13812345678", &sent.code).await.unwrap());
    }
}

//! In-memory delivery channel for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::CodeDeliveryTrait;

/// Records every code it is asked to deliver
#[derive(Default)]
pub struct MockCodeDelivery {
    sent: Arc<RwLock<HashMap<String, String>>>,
    send_count: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockCodeDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delivery channel that rejects every send
    pub fn failing() -> Self {
        let delivery = Self::default();
        delivery.should_fail.store(true, Ordering::SeqCst);
        delivery
    }

    /// Last code delivered to `phone`
    pub async fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent.read().await.get(phone).cloned()
    }

    /// Number of successful deliveries
    pub fn send_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeDeliveryTrait for MockCodeDelivery {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("mock delivery error".to_string());
        }
        self.sent
            .write()
            .await
            .insert(phone.to_string(), code.to_string());
        self.send_count.fetch_add(1, Ordering::SeqCst);
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

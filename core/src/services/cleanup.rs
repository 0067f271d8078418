//! Periodic removal of expired verification codes
//!
//! Codes are deleted once their expiry has passed, used or not.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::VerificationCodeRepository;

/// Configuration for the code cleanup task
#[derive(Debug, Clone)]
pub struct CodeCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to run cleanup at all
    pub enabled: bool,
}

impl Default for CodeCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

/// Service that sweeps expired verification codes
pub struct CodeCleanupService<R: VerificationCodeRepository + 'static> {
    repository: Arc<R>,
    config: CodeCleanupConfig,
}

impl<R: VerificationCodeRepository + 'static> CodeCleanupService<R> {
    pub fn new(repository: Arc<R>, config: CodeCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of codes deleted
    pub async fn run_cleanup(&self) -> Result<u64, DomainError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.repository.delete_expired(Utc::now()).await?;
        if deleted > 0 {
            info!(deleted = deleted, event = "codes_expired", "Deleted expired verification codes");
        }
        Ok(deleted)
    }

    /// Start the sweep as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification code cleanup is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Verification code cleanup started - will run every {} seconds",
                period.as_secs()
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "Verification code cleanup cycle failed");
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_code::VerificationCode;
    use crate::repositories::mock::MockVerificationCodeRepository;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn test_run_cleanup_deletes_only_expired() {
        let repository = Arc::new(MockVerificationCodeRepository::new());
        let now = Utc::now();
        repository
            .insert_raw(VerificationCode::issued_at("13800000001", "111111", now - ChronoDuration::minutes(10)))
            .await;
        repository
            .insert_raw(VerificationCode::issued_at("13800000002", "222222", now))
            .await;

        let service = CodeCleanupService::new(repository.clone(), CodeCleanupConfig::default());
        assert_eq!(service.run_cleanup().await.unwrap(), 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_cleanup_is_noop() {
        let repository = Arc::new(MockVerificationCodeRepository::new());
        repository
            .insert_raw(VerificationCode::issued_at(
                "13800000001",
                "111111",
                Utc::now() - ChronoDuration::minutes(10),
            ))
            .await;

        let service = Arc::new(CodeCleanupService::new(
            repository.clone(),
            CodeCleanupConfig {
                interval_seconds: 1,
                enabled: false,
            },
        ));
        assert_eq!(service.run_cleanup().await.unwrap(), 0);
        assert!(service.start_background_task().is_none());
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_background_task_sweeps() {
        let repository = Arc::new(MockVerificationCodeRepository::new());
        repository
            .insert_raw(VerificationCode::issued_at(
                "13800000001",
                "111111",
                Utc::now() - ChronoDuration::minutes(10),
            ))
            .await;

        let service = Arc::new(CodeCleanupService::new(repository.clone(), CodeCleanupConfig::default()));
        let handle = service.start_background_task().unwrap();

        // First tick fires immediately
        for _ in 0..50 {
            if repository.len().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();
        assert_eq!(repository.len().await, 0);
    }
}

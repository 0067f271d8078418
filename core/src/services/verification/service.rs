//! Main verification service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use sf_shared::phone::mask_phone_number;

use crate::domain::entities::verification_code::{VerificationCode, RESEND_COOLDOWN_SECONDS};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::traits::CodeDeliveryTrait;
use super::types::{SendCodeResult, SendPermit};

/// Verification service for issuing and checking one-time codes
pub struct VerificationService<R: VerificationCodeRepository, D: CodeDeliveryTrait> {
    /// Persistence for issued codes
    repository: Arc<R>,
    /// Channel that delivers codes to the phone owner
    delivery: Arc<D>,
}

impl<R: VerificationCodeRepository, D: CodeDeliveryTrait> VerificationService<R, D> {
    /// Create a new verification service
    pub fn new(repository: Arc<R>, delivery: Arc<D>) -> Self {
        Self { repository, delivery }
    }

    /// Check the per-phone resend cooldown.
    ///
    /// Looks at the most recent code created for `phone` within the cooldown
    /// window, whether or not it has been used.
    pub async fn can_send(&self, phone: &str) -> DomainResult<SendPermit> {
        let now = Utc::now();
        let since = now - Duration::seconds(RESEND_COOLDOWN_SECONDS);

        let latest = self.repository.find_latest_created_since(phone, since).await?;

        let permit = match latest.and_then(|code| code.resend_cooldown_remaining(now)) {
            Some(remaining) => SendPermit::denied(remaining),
            None => SendPermit::allowed(),
        };
        Ok(permit)
    }

    /// Generate a new 6-digit code
    pub fn generate_code() -> String {
        VerificationCode::generate_code()
    }

    /// Hand `code` to the delivery channel
    pub async fn dispatch(&self, phone: &str, code: &str) -> DomainResult<String> {
        let message_id = self
            .delivery
            .send_verification_code(phone, code)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(phone),
                    provider = self.delivery.provider_name(),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Delivery { message: e }
            })?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            provider = self.delivery.provider_name(),
            message_id = %message_id,
            event = "code_dispatched",
            "Verification code dispatched"
        );
        Ok(message_id)
    }

    /// Persist `code` as the only active code for `phone`.
    ///
    /// Every earlier unused code for the phone is marked used before the new
    /// record is inserted.
    pub async fn store(&self, phone: &str, code: &str) -> DomainResult<VerificationCode> {
        let invalidated = self.repository.invalidate_unused(phone).await?;
        if invalidated > 0 {
            tracing::debug!(
                phone = %mask_phone_number(phone),
                invalidated = invalidated,
                "Invalidated previous verification codes"
            );
        }

        let stored = self
            .repository
            .create(VerificationCode::new(phone, code))
            .await?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            code_id = %stored.id,
            event = "code_stored",
            "Stored new verification code"
        );
        Ok(stored)
    }

    /// Check and consume a code.
    ///
    /// Returns `true` exactly once for an unused, unexpired code. Any other
    /// outcome returns `false` and leaves stored state untouched.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<bool> {
        let now = Utc::now();

        let Some(active) = self.repository.find_active(phone, code, now).await? else {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "code_verification_failed",
                "No active verification code matched"
            );
            return Ok(false);
        };

        // A concurrent verify may have consumed it since the lookup
        let consumed = self.repository.mark_used(active.id).await?;
        if consumed {
            tracing::info!(
                phone = %mask_phone_number(phone),
                code_id = %active.id,
                event = "code_verified",
                "Verification code consumed"
            );
        } else {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                code_id = %active.id,
                event = "code_already_consumed",
                "Verification code was consumed concurrently"
            );
        }
        Ok(consumed)
    }

    /// Full send flow: cooldown check, generate, store, dispatch.
    ///
    /// # Returns
    /// * `Ok(SendCodeResult)` - The code was stored and handed to delivery
    /// * `Err(DomainError::RateLimited)` - Inside the cooldown; nothing was
    ///   generated, stored or sent
    /// * `Err(DomainError)` - Storage or delivery failed
    pub async fn send_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let permit = self.can_send(phone).await?;
        if !permit.allowed {
            let remaining_seconds = permit.remaining_seconds.unwrap_or(0);
            tracing::warn!(
                phone = %mask_phone_number(phone),
                remaining_seconds = remaining_seconds,
                event = "rate_limit_exceeded",
                "Verification code requested inside cooldown"
            );
            return Err(DomainError::RateLimited { remaining_seconds });
        }

        let code = Self::generate_code();
        let stored = self.store(phone, &code).await?;
        let message_id = self.dispatch(phone, &code).await?;

        Ok(SendCodeResult {
            code,
            message_id,
            expires_at: stored.expires_at,
            next_resend_at: stored.created_at + Duration::seconds(RESEND_COOLDOWN_SECONDS),
        })
    }
}

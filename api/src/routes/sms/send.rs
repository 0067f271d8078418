use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::domain::entities::RESEND_COOLDOWN_SECONDS;
use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::CodeDeliveryTrait;
use sf_shared::phone::mask_phone_number;
use sf_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{domain_error_response, validation_failure};
use crate::routes::health::StoreHealth;

/// Handler for POST /api/sms/send
///
/// # Request Body
/// ```json
/// { "phone": "13812345678" }
/// ```
///
/// # Response
/// ```json
/// {
///     "success": true,
///     "message": "验证码已发送，请注意查收",
///     "data": { "expiresAt": "...", "resendAfter": 60 }
/// }
/// ```
///
/// Inside the resend cooldown the envelope has `success: false` and
/// `data.remainingSeconds`. In development `data.code` carries the raw code.
pub async fn send_code<R, D, S, F, H>(
    state: web::Data<AppState<R, D, S, F, H>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    tracing::info!(phone = %mask_phone_number(&request.phone), "Processing send_code request");

    match state.verification_service.send_code(&request.phone).await {
        Ok(result) => {
            let body = SendCodeResponse {
                expires_at: result.expires_at,
                resend_after: RESEND_COOLDOWN_SECONDS,
                code: state.expose_codes().then_some(result.code),
            };
            HttpResponse::Ok().json(ApiResponse::success(body).with_message("验证码已发送，请注意查收"))
        }
        Err(e) => domain_error_response(&e, "发送失败，请稍后重试"),
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::CodeDeliveryTrait;
use sf_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::VerifyCodeRequest;
use crate::handlers::{domain_error_response, validation_failure};
use crate::routes::health::StoreHealth;

/// Handler for POST /api/sms/verify
///
/// A matching unused, unexpired code is consumed and `success: true` is
/// returned; any other code yields `success: false` without side effects.
pub async fn verify_code<R, D, S, F, H>(
    state: web::Data<AppState<R, D, S, F, H>>,
    request: web::Json<VerifyCodeRequest>,
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

    match state
        .verification_service
        .verify(&request.phone, &request.code)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::<()>::message("验证码验证成功")),
        Ok(false) => HttpResponse::Ok().json(ApiResponse::<()>::failure("验证码错误或已过期")),
        Err(e) => domain_error_response(&e, "验证失败，请稍后重试"),
    }
}

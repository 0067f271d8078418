use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::CodeDeliveryTrait;
use sf_shared::validation::FieldError;
use sf_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::error::VALIDATION_FAILED;
use crate::handlers::{domain_error_response, extract_client_ip};
use crate::routes::health::StoreHealth;

/// Handler for POST /api/form/submit
///
/// # Request Body
/// Any subset of `name`, `age`, `gender`, `phone`, `idCard`, `address` and
/// `extraData`. Unknown keys are ignored.
///
/// # Response
/// ```json
/// {
///     "success": true,
///     "message": "数据提交成功",
///     "data": { "id": "...", "submittedAt": "...", "isUpdate": false }
/// }
/// ```
pub async fn submit_form<R, D, S, F, H>(
    req: HttpRequest,
    state: web::Data<AppState<R, D, S, F, H>>,
    body: web::Json<Value>,
) -> HttpResponse
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    let Some(raw) = body.as_object() else {
        return HttpResponse::Ok().json(ApiResponse::<()>::failure(VALIDATION_FAILED).with_errors(vec![
            FieldError::new("body", "request body must be a JSON object", "type"),
        ]));
    };

    let client_ip = extract_client_ip(&req);

    match state.submission_service.submit(raw, &client_ip).await {
        Ok(outcome) => {
            let message = if outcome.is_update { "数据更新成功" } else { "数据提交成功" };
            HttpResponse::Ok().json(ApiResponse::success(outcome).with_message(message))
        }
        Err(e) => domain_error_response(&e, "数据保存失败"),
    }
}

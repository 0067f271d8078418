use actix_web::{web, HttpResponse};

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::CodeDeliveryTrait;
use sf_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::FormDefinitionResponse;
use crate::handlers::domain_error_response;
use crate::routes::health::StoreHealth;

/// Handler for GET /api/form/definition
///
/// Returns the current active form with fields sorted by `order`, or the
/// built-in definition when none is stored.
pub async fn form_definition<R, D, S, F, H>(state: web::Data<AppState<R, D, S, F, H>>) -> HttpResponse
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    match state.form_service.definition().await {
        Ok(schema) => HttpResponse::Ok().json(ApiResponse::success(FormDefinitionResponse::from(schema))),
        Err(e) => domain_error_response(&e, "获取表单定义失败"),
    }
}

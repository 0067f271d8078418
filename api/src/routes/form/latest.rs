use actix_web::{web, HttpResponse};

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::{CodeDeliveryTrait, LATEST_SUBMISSIONS_LIMIT};
use sf_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_response;
use crate::routes::health::StoreHealth;

/// Handler for GET /api/form/latest
///
/// The most recently created submissions, newest first, with `count`.
pub async fn latest_submissions<R, D, S, F, H>(state: web::Data<AppState<R, D, S, F, H>>) -> HttpResponse
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    match state.submission_service.latest(LATEST_SUBMISSIONS_LIMIT).await {
        Ok(items) => {
            let count = items.len();
            HttpResponse::Ok().json(ApiResponse::success(items).with_count(count))
        }
        Err(e) => domain_error_response(&e, "获取最新数据失败"),
    }
}

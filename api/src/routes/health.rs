use actix_web::{web, HttpResponse};
use async_trait::async_trait;

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::CodeDeliveryTrait;
use sf_infra::database::LazyDatabase;

use crate::app::AppState;

/// Store reachability probe used by the health endpoint
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

#[async_trait]
impl StoreHealth for LazyDatabase {
    async fn is_reachable(&self) -> bool {
        self.health_check().await
    }
}

/// Handler for GET /health
///
/// Always answers 200 while the process is serving; `database` reports
/// whether the store answered `SELECT 1`.
pub async fn health_check<R, D, S, F, H>(state: web::Data<AppState<R, D, S, F, H>>) -> HttpResponse
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    let reachable = state.store_health.is_reachable().await;

    HttpResponse::Ok().json(serde_json::json!({
        "status": if reachable { "healthy" } else { "degraded" },
        "service": "simple-form-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": if reachable { "connected" } else { "unavailable" },
    }))
}

use actix_web::{web, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sf_api::app::{create_app, AppState};
use sf_core::services::{
    CodeCleanupConfig, CodeCleanupService, CodeDeliveryTrait, FormService, SubmissionService,
    VerificationService,
};
use sf_infra::database::{
    LazyDatabase, MySqlFormSchemaRepository, MySqlSubmissionRepository,
    MySqlVerificationCodeRepository,
};
use sf_infra::sms::create_code_delivery;
use sf_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(environment = %config.environment, "Starting Simple Form API server");

    // The server starts even when the store is down; requests retry the connection.
    let database = Arc::new(LazyDatabase::new(config.database.clone()));
    if let Err(e) = database.pool().await {
        tracing::warn!(error = %e, "Database unavailable at startup");
    }

    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(database.clone()));
    let submission_repository = Arc::new(MySqlSubmissionRepository::new(database.clone()));
    let form_repository = Arc::new(MySqlFormSchemaRepository::new(database.clone()));
    let delivery = Arc::new(create_code_delivery(&config.sms)?);

    tracing::info!(provider = delivery.provider_name(), "Code delivery ready");

    let cleanup = Arc::new(CodeCleanupService::new(
        code_repository.clone(),
        CodeCleanupConfig {
            interval_seconds: config.sms.cleanup_interval_secs,
            ..Default::default()
        },
    ))
    .start_background_task();

    let state = web::Data::new(AppState {
        verification_service: Arc::new(VerificationService::new(code_repository, delivery)),
        submission_service: Arc::new(SubmissionService::new(submission_repository)),
        form_service: Arc::new(FormService::new(form_repository)),
        store_health: database.clone(),
        environment: config.environment,
    });

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = cleanup {
        handle.abort();
    }
    database.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

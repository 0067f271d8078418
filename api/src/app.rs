//! Application state and factory
//!
//! This module defines the shared application state and builds the
//! Actix-web application with all routes and middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use sf_core::repositories::{FormSchemaRepository, SubmissionRepository, VerificationCodeRepository};
use sf_core::services::{CodeDeliveryTrait, FormService, SubmissionService, VerificationService};
use sf_shared::{ApiResponse, Environment};

use crate::handlers::error::json_config;
use crate::middleware::cors::create_cors;
use crate::routes::form::{definition::form_definition, latest::latest_submissions, submit::submit_form};
use crate::routes::health::{health_check, StoreHealth};
use crate::routes::sms::{send::send_code, verify::verify_code};

/// Application state that holds shared services
pub struct AppState<R, D, S, F, H>
where
    R: VerificationCodeRepository,
    D: CodeDeliveryTrait,
    S: SubmissionRepository,
    F: FormSchemaRepository,
    H: StoreHealth,
{
    pub verification_service: Arc<VerificationService<R, D>>,
    pub submission_service: Arc<SubmissionService<S>>,
    pub form_service: Arc<FormService<F>>,
    pub store_health: Arc<H>,
    pub environment: Environment,
}

impl<R, D, S, F, H> AppState<R, D, S, F, H>
where
    R: VerificationCodeRepository,
    D: CodeDeliveryTrait,
    S: SubmissionRepository,
    F: FormSchemaRepository,
    H: StoreHealth,
{
    /// Whether send responses may carry the raw code
    pub fn expose_codes(&self) -> bool {
        self.environment.is_development()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, D, S, F, H>(
    app_state: web::Data<AppState<R, D, S, F, H>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: VerificationCodeRepository + 'static,
    D: CodeDeliveryTrait + 'static,
    S: SubmissionRepository + 'static,
    F: FormSchemaRepository + 'static,
    H: StoreHealth + 'static,
{
    let cors = create_cors(app_state.environment);

    App::new()
        .app_data(app_state)
        // Malformed bodies still get the JSON envelope
        .app_data(json_config())
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<R, D, S, F, H>))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/form")
                        .route("/definition", web::get().to(form_definition::<R, D, S, F, H>))
                        .route("/latest", web::get().to(latest_submissions::<R, D, S, F, H>))
                        .route("/submit", web::post().to(submit_form::<R, D, S, F, H>)),
                )
                .service(
                    web::scope("/sms")
                        .route("/send", web::post().to(send_code::<R, D, S, F, H>))
                        .route("/verify", web::post().to(verify_code::<R, D, S, F, H>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::failure("The requested resource was not found"))
}

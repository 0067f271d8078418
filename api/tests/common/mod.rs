//! Test fixtures shared by the route tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sf_api::app::AppState;
use sf_api::routes::health::StoreHealth;
use sf_core::repositories::mock::{
    MockFormSchemaRepository, MockSubmissionRepository, MockVerificationCodeRepository,
};
use sf_core::services::{FormService, MockCodeDelivery, SubmissionService, VerificationService};
use sf_shared::Environment;

/// Store probe whose answer the test controls
pub struct StubStoreHealth {
    reachable: AtomicBool,
}

impl StubStoreHealth {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreHealth for StubStoreHealth {
    async fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}

pub type TestState = AppState<
    MockVerificationCodeRepository,
    MockCodeDelivery,
    MockSubmissionRepository,
    MockFormSchemaRepository,
    StubStoreHealth,
>;

/// Mocks behind a test application, kept for assertions
pub struct TestContext {
    pub codes: Arc<MockVerificationCodeRepository>,
    pub delivery: Arc<MockCodeDelivery>,
    pub submissions: Arc<MockSubmissionRepository>,
    pub forms: Arc<MockFormSchemaRepository>,
    pub store_health: Arc<StubStoreHealth>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new(environment: Environment) -> Self {
        Self::with_forms(environment, MockFormSchemaRepository::new())
    }

    pub fn with_forms(environment: Environment, forms: MockFormSchemaRepository) -> Self {
        let codes = Arc::new(MockVerificationCodeRepository::new());
        let delivery = Arc::new(MockCodeDelivery::new());
        let submissions = Arc::new(MockSubmissionRepository::new());
        let forms = Arc::new(forms);
        let store_health = Arc::new(StubStoreHealth::new(true));

        let state = web::Data::new(AppState {
            verification_service: Arc::new(VerificationService::new(codes.clone(), delivery.clone())),
            submission_service: Arc::new(SubmissionService::new(submissions.clone())),
            form_service: Arc::new(FormService::new(forms.clone())),
            store_health: store_health.clone(),
            environment,
        });

        Self {
            codes,
            delivery,
            submissions,
            forms,
            store_health,
            state,
        }
    }
}

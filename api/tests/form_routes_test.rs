use actix_web::test;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use sf_api::app::create_app;
use sf_core::domain::entities::{FieldType, FormField, FormSchema};
use sf_core::repositories::mock::MockFormSchemaRepository;
use sf_shared::Environment;

mod common;
use common::TestContext;

const ID_CARD: &str = "11010119900101123x";

fn text_field(name: &str, order: i32) -> FormField {
    FormField {
        name: name.to_string(),
        label: name.to_string(),
        field_type: FieldType::Text,
        required: false,
        placeholder: String::new(),
        validation: Default::default(),
        options: Vec::new(),
        order,
    }
}

#[actix_web::test]
async fn test_definition_fallback() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/form/definition").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["version"], "1.0.0");
    let names: Vec<&str> = body["data"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["name", "age", "gender", "phone", "idCard", "address"]);
}

#[actix_web::test]
async fn test_definition_sorts_stored_fields() {
    let now = Utc::now();
    let schema = FormSchema {
        id: Uuid::new_v4(),
        version: "2.1.0".to_string(),
        fields: vec![text_field("city", 3), text_field("nickname", 1), text_field("hobby", 2)],
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let ctx = TestContext::with_forms(
        Environment::Production,
        MockFormSchemaRepository::with_schemas(vec![schema]),
    );
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/form/definition").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["version"], "2.1.0");
    assert_eq!(body["data"]["fields"][0]["name"], "nickname");
    assert_eq!(body["data"]["fields"][2]["name"], "city");
    assert_eq!(body["data"]["fields"][0]["type"], "text");
}

#[actix_web::test]
async fn test_definition_store_failure() {
    let ctx = TestContext::new(Environment::Production);
    ctx.forms.set_failing(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/form/definition").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "获取表单定义失败");
}

#[actix_web::test]
async fn test_submit_then_update_by_id_card() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .set_json(json!({
            "name": "张三",
            "age": 30,
            "gender": "男",
            "phone": "13812345678",
            "idCard": ID_CARD,
            "address": "北京市东城区"
        }))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["message"], "数据提交成功");
    assert_eq!(first["data"]["isUpdate"], false);

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .set_json(json!({ "age": 31, "idCard": ID_CARD.to_uppercase() }))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["success"], true);
    assert_eq!(second["message"], "数据更新成功");
    assert_eq!(second["data"]["isUpdate"], true);
    assert_eq!(second["data"]["id"], first["data"]["id"]);

    let records = ctx.submissions.all().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].age, Some(31));
    // Fields absent from the update keep their stored values
    assert_eq!(records[0].name.as_deref(), Some("张三"));
}

#[actix_web::test]
async fn test_submit_records_forwarded_ip() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
        .set_json(json!({ "name": "李四" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);

    let records = ctx.submissions.all().await;
    assert_eq!(records[0].ip_address, "203.0.113.7");
    assert_eq!(records[0].id_card, None);
}

#[actix_web::test]
async fn test_submit_validation_failure() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .set_json(json!({ "name": "王五", "age": 200, "gender": "未知" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "数据验证失败");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"age"));
    assert!(fields.contains(&"gender"));
    assert_eq!(ctx.submissions.len().await, 0);
}

#[actix_web::test]
async fn test_submit_non_object_body() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .set_json(json!([1, 2, 3]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "数据验证失败");
    assert_eq!(body["errors"][0]["field"], "body");
}

#[actix_web::test]
async fn test_submit_store_failure() {
    let ctx = TestContext::new(Environment::Production);
    ctx.submissions.set_failing(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/form/submit")
        .set_json(json!({ "idCard": ID_CARD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "数据保存失败");
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_latest_returns_newest_five() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for i in 0..7 {
        let req = test::TestRequest::post()
            .uri("/api/form/submit")
            .set_json(json!({ "name": format!("用户{}", i) }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/form/latest").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 5);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["name"], "用户6");
    assert!(items[0].get("submittedAt").is_some());
    assert!(items[0].get("ipAddress").is_none());
}

#[actix_web::test]
async fn test_latest_empty() {
    let ctx = TestContext::new(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/form/latest").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

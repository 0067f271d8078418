//! Mapping of failures to the response envelope
//!
//! Every failure is answered with HTTP 200 and `success: false`.

use actix_web::{error::InternalError, web, HttpResponse};

use sf_core::errors::DomainError;
use sf_shared::validation::FieldError;
use sf_shared::ApiResponse;

use crate::dto::RateLimitedResponse;

/// Message used for every validation failure of a submission
pub const VALIDATION_FAILED: &str = "数据验证失败";

/// Convert a domain error into an envelope, using `fallback` as the message
/// for failures that are not the caller's fault
pub fn domain_error_response(error: &DomainError, fallback: &str) -> HttpResponse {
    match error {
        DomainError::Validation { errors } => {
            tracing::warn!(fields = ?errors.fields(), "Request failed validation");
            HttpResponse::Ok().json(
                ApiResponse::<()>::failure(VALIDATION_FAILED).with_errors(errors.errors().to_vec()),
            )
        }
        DomainError::RateLimited { remaining_seconds } => {
            let mut response =
                ApiResponse::failure(format!("发送过于频繁，请 {} 秒后再试", remaining_seconds));
            response.data = Some(RateLimitedResponse {
                remaining_seconds: *remaining_seconds,
            });
            HttpResponse::Ok().json(response)
        }
        DomainError::Storage { message }
        | DomainError::Delivery { message }
        | DomainError::Internal { message } => {
            tracing::error!(error = %error, "Request failed");
            HttpResponse::Ok().json(ApiResponse::<()>::failure(fallback).with_error(message.clone()))
        }
    }
}

/// Envelope for DTO validation failures; the first message becomes the
/// envelope message
pub fn validation_failure(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let field_errors: Vec<FieldError> = fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message, error.code.to_string())
            })
        })
        .collect();

    let message = field_errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "参数错误".to_string());

    tracing::warn!(message = %message, "Request body failed validation");
    HttpResponse::Ok().json(ApiResponse::<()>::failure(message).with_errors(field_errors))
}

/// JSON extractor configuration that reports malformed bodies in the envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!(error = %err, "Rejected malformed JSON body");
        let response =
            HttpResponse::Ok().json(ApiResponse::<()>::failure("参数错误").with_error(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

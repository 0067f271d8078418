//! CORS middleware configuration for cross-origin requests.
//!
//! The form is served to browsers, so development allows any origin while
//! production only allows origins listed in `ALLOWED_ORIGINS`.
//!
//! # Environment Variables
//! - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
//! - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)

use actix_cors::Cors;
use actix_web::http::{header, Method, Uri};
use std::env;

use sf_shared::Environment;

/// Creates a CORS middleware instance configured for `environment`
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment.is_production() {
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();
        create_production_cors(max_age, parse_origins(&origins))
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::debug!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_any_header()
        .max_age(max_age)
}

fn create_production_cors(max_age: usize, origins: Vec<String>) -> Cors {
    tracing::info!("Configuring CORS for production with {} allowed origins", origins.len());

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Split a comma-separated origin list, dropping blanks and entries that are
/// not a `scheme://host[:port]` origin
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter(|origin| {
            let valid = is_valid_origin(origin);
            if !valid {
                tracing::warn!(origin = %origin, "Ignoring invalid entry in ALLOWED_ORIGINS");
            }
            valid
        })
        .map(str::to_owned)
        .collect()
}

fn is_valid_origin(origin: &str) -> bool {
    match origin.parse::<Uri>() {
        Ok(uri) => {
            matches!(uri.scheme_str(), Some("http") | Some("https"))
                && uri.host().is_some_and(|host| !host.is_empty())
                && uri.path_and_query().map_or(true, |p| p.as_str().is_empty() || p.as_str() == "/")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://form.example.com, ,https://admin.example.com "),
            vec!["https://form.example.com", "https://admin.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_origins_drops_invalid_entries() {
        assert_eq!(
            parse_origins(
                "*, form.example.com, https://form.example.com, http://localhost:3000, \
                 ftp://x.example.com, https://"
            ),
            vec!["https://form.example.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_create_cors_for_each_environment() {
        let _development = create_cors(Environment::Development);
        let _production = create_production_cors(600, vec!["https://form.example.com".into()]);
    }
}

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

/// CORS for the configured origins. Reports are read-only, so only GET
/// and preflight are allowed.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect();

    let origins = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS, Method::HEAD])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(300))
}

/// CORS configuration for development (more permissive)
pub fn create_development_cors_layer() -> CorsLayer {
    use tower_http::cors::{AllowHeaders, AllowMethods};

    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
}

/// Select appropriate CORS layer based on environment
pub fn create_cors_layer_for_config(config: &Config) -> CorsLayer {
    if config.is_development() {
        create_development_cors_layer()
    } else {
        create_cors_layer(&config.allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_cors_layer_with_origins() {
        let cors = create_cors_layer(&origins(&["https://example.com", "http://localhost:5173"]));
        assert!(matches!(cors, CorsLayer { .. }));
    }

    #[test]
    fn test_create_cors_layer_invalid_origins_fall_back() {
        let cors = create_cors_layer(&origins(&["bad\norigin"]));
        assert!(matches!(cors, CorsLayer { .. }));
    }

    #[test]
    fn test_create_cors_layer_empty() {
        let cors = create_cors_layer(&[]);
        assert!(matches!(cors, CorsLayer { .. }));
    }

    #[test]
    fn test_create_cors_layer_for_production_config() {
        let config = Config::from_lookup(|key| match key {
            "ENVIRONMENT" => Some("production".to_string()),
            _ => None,
        });
        let cors = create_cors_layer_for_config(&config);
        assert!(matches!(cors, CorsLayer { .. }));
    }
}

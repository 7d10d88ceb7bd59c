//! CORS handling.
//!
//! Every response carries the configured `Access-Control-Allow-*` headers.
//! `OPTIONS` requests are answered here with an empty 200 before routing,
//! whatever the path.

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::CorsConfig;

/// Pre-validated CORS header values.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    pub allow_origin: HeaderValue,
    pub allow_methods: HeaderValue,
    pub allow_headers: HeaderValue,
}

impl CorsHeaders {
    /// Invalid values fall back to the defaults; validation normally
    /// rejects them before this point.
    pub fn from_config(config: &CorsConfig) -> Self {
        let defaults = CorsConfig::default();
        Self {
            allow_origin: header_or_default("allow_origin", &config.allow_origin, &defaults.allow_origin),
            allow_methods: header_or_default("allow_methods", &config.allow_methods, &defaults.allow_methods),
            allow_headers: header_or_default("allow_headers", &config.allow_headers, &defaults.allow_headers),
        }
    }
}

fn header_or_default(field: &str, value: &str, default: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| {
        tracing::warn!(field, value, "Invalid CORS header value, using default");
        HeaderValue::from_str(default).unwrap_or(HeaderValue::from_static("*"))
    })
}

/// Answer CORS preflights with an empty 200.
pub async fn preflight(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

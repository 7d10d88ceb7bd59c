//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and header values before they reach the server
//! - Validate value ranges (limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("{field}: not a valid header value")]
    InvalidHeader { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },
}

/// Check a loaded configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "soundcloud.api_base_url", &config.soundcloud.api_base_url);
    check_url(&mut errors, "soundcloud.site_base_url", &config.soundcloud.site_base_url);

    for (field, value) in [
        ("soundcloud.default_limit", config.soundcloud.default_limit),
        ("soundcloud.max_limit", config.soundcloud.max_limit),
    ] {
        if value <= 0 {
            errors.push(ValidationError::NotPositive { field, value });
        }
    }

    for (field, value) in [
        ("cors.allow_origin", &config.cors.allow_origin),
        ("cors.allow_methods", &config.cors.allow_methods),
        ("cors.allow_headers", &config.cors.allow_headers),
        ("soundcloud.user_agent", &config.soundcloud.user_agent),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeader { field });
        }
    }

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "server.name" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

//! Error responses.
//!
//! # Responsibilities
//! - Map every failure to a status code and a JSON body
//! - Relay upstream status codes untouched
//!
//! # Design Decisions
//! - Handlers return `Result<_, ApiError>`; nothing escapes as a panic or a
//!   plain-text body
//! - `error` is always present; `details` carries the raw upstream body and
//!   `message` the underlying failure for internal errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::soundcloud::SoundCloudError;

/// Failures a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Query parameter \"q\" is required")]
    MissingQuery,

    #[error("Client ID is required. Set SOUNDCLOUD_CLIENT_ID secret or pass it as query parameter")]
    MissingClientId,

    #[error("SoundCloud API error: {}", .status.as_u16())]
    Upstream { status: StatusCode, details: String },

    #[error("Internal server error")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// JSON shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::MissingClientId => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (details, message) = match self {
            ApiError::Upstream { details, .. } => (Some(details.clone()), None),
            ApiError::Internal(message) => (None, Some(message.clone())),
            _ => (None, None),
        };
        ErrorBody {
            error: self.to_string(),
            details,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<SoundCloudError> for ApiError {
    fn from(err: SoundCloudError) -> Self {
        match err {
            SoundCloudError::Status { status, body } => ApiError::Upstream {
                status,
                details: body,
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

//! Request handlers.
//!
//! Health and 404 live here; the search endpoint has its own module.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;

pub use crate::http::search::search;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: state.config.server.name.clone(),
        version: state.config.server.version.clone(),
    })
}

/// Fallback for every unmapped path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

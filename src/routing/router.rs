//! Dispatch table.
//!
//! # Responsibilities
//! - Map `(method, path)` to an independent handler
//! - Provide bounded route labels for logs and metrics
//!
//! # Design Decisions
//! - Paths match exactly; `/health/` is a 404
//! - Handlers accept any method; `OPTIONS` never reaches the table because
//!   the preflight middleware answers it first
//! - Unmatched requests fall through to the JSON 404 handler

use axum::{http::Method, routing::any, Router};

use crate::http::handlers::{health, not_found, search};
use crate::http::server::AppState;

pub const HEALTH_PATH: &str = "/health";
pub const SEARCH_PATH: &str = "/api/soundcloud/search";

/// Named routes, in match order.
pub const ROUTES: &[(&str, &str)] = &[("health", HEALTH_PATH), ("search", SEARCH_PATH)];

/// Build the table. Preflight and CORS are layered on by the server.
pub fn dispatch_table() -> Router<AppState> {
    Router::new()
        .route(HEALTH_PATH, any(health))
        .route(SEARCH_PATH, any(search))
        .fallback(not_found)
}

/// Label a request the same way the table and preflight middleware route it.
pub fn route_label(method: &Method, path: &str) -> &'static str {
    if *method == Method::OPTIONS {
        return "preflight";
    }
    ROUTES
        .iter()
        .find(|(_, route_path)| *route_path == path)
        .map(|(name, _)| *name)
        .unwrap_or("not_found")
}

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → OPTIONS?               → preflight middleware (http::middleware::cors)
//!     → /health                → handlers::health
//!     → /api/soundcloud/search → handlers::search
//!     → anything else          → handlers::not_found
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins

pub mod router;

pub use router::{dispatch_table, route_label, HEALTH_PATH, SEARCH_PATH};

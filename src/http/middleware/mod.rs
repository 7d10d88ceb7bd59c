//! Request middleware.

pub mod cors;

pub use cors::{preflight, CorsHeaders};

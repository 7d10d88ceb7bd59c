//! SoundCloud search proxy library.
//!
//! Forwards track searches to the SoundCloud API with a server-side
//! credential and answers with a normalized, stable JSON schema.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod soundcloud;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides (SOUNDCLOUD_CLIENT_ID)
//!     → CLI overrides (main.rs: --bind, --log-level)
//!     → validation.rs (semantic checks, run once)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with every handler
//! ```
//!
//! The query string sits on top of this chain: a `client_id` sent by the
//! caller wins over anything configured here.
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, ServerInfo,
    SoundCloudConfig,
};

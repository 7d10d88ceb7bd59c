//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Browser-like signature; the upstream rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Root configuration for the search proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Identity reported by the health endpoint.
    pub server: ServerInfo,

    /// Upstream search API settings.
    pub soundcloud: SoundCloudConfig,

    /// CORS response headers.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "SoundCloud Proxy Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundCloudConfig {
    /// Base URL of the search API, without a trailing path.
    pub api_base_url: String,

    /// Public site used to build permalinks when the upstream omits them.
    pub site_base_url: String,

    /// Fallback credential used when the request carries none.
    /// Overridden by `SOUNDCLOUD_CLIENT_ID`.
    pub client_id: Option<String>,

    /// Limit used when the request omits one or sends garbage.
    pub default_limit: i64,

    /// Upper bound for the forwarded limit.
    pub max_limit: i64,

    /// User-Agent sent upstream.
    pub user_agent: String,

    /// Honor HTTP_PROXY / HTTPS_PROXY for upstream calls.
    pub use_env_proxy: bool,
}

impl Default for SoundCloudConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api-v2.soundcloud.com".to_string(),
            site_base_url: "https://soundcloud.com".to_string(),
            client_id: None,
            default_limit: 10,
            max_limit: 50,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_env_proxy: true,
        }
    }
}

/// CORS headers attached to every response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

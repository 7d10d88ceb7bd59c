//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::ValidationError;

/// Environment variable holding the upstream credential.
pub const CLIENT_ID_ENV: &str = "SOUNDCLOUD_CLIENT_ID";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file into a configuration. Does not validate.
pub fn load_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored so an unset-but-declared secret falls through
/// to the configured fallback.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(client_id) = lookup(CLIENT_ID_ENV).filter(|v| !v.is_empty()) {
        tracing::debug!(var = CLIENT_ID_ENV, "Client ID taken from environment");
        config.soundcloud.client_id = Some(client_id);
    }
}

/// Build the effective configuration: defaults, then the optional file,
/// then the process environment. Not validated: the caller still layers
/// CLI overrides on top and runs `validate_config` once at the end.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

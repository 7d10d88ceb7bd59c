//! SoundCloud search proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                   SEARCH PROXY                        │
//!                  │                                                       │
//!   Browser        │  ┌────────────┐   ┌───────────┐   ┌──────────────┐   │
//!   ───────────────┼─▶│ middleware │──▶│ dispatch  │──▶│   handlers   │   │
//!                  │  │ id/trace/  │   │  table    │   │ health/search│   │
//!                  │  │ cors/pre-  │   └───────────┘   └──────┬───────┘   │
//!                  │  │ flight     │                          │           │
//!                  │  └────────────┘                          ▼           │
//!                  │                                   ┌──────────────┐   │    SoundCloud
//!   ◀──────────────┼───── JSON (normalized tracks) ◀───│  soundcloud  │◀──┼──▶ api-v2
//!                  │                                   │client+transform│  │
//!                  │                                   └──────────────┘   │
//!                  │   config · observability · lifecycle                  │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use soundcloud_proxy::config::validation::validate_config;
use soundcloud_proxy::config::{load_config, ConfigError};
use soundcloud_proxy::lifecycle::startup;
use soundcloud_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "soundcloud-proxy")]
#[command(about = "Proxy SoundCloud track searches behind a server-side client ID", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    tracing::info!(
        "{} v{} starting",
        config.server.name,
        config.server.version
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base_url = %config.soundcloud.api_base_url,
        fallback_client_id = config.soundcloud.client_id.is_some(),
        max_limit = config.soundcloud.max_limit,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Concierge server binary: serve the chat API over the configured provider.

use anyhow::Context;
use clap::Parser;
use concierge::config::ConciergeConfig;
use concierge::core::{GroqClient, Orchestrator, SessionStore};
use concierge::server::AppState;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the concierge server.
#[derive(Parser)]
#[command(name = "concierge", version)]
struct Cli {
    /// Optional path to a concierge.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen port override
    #[arg(long)]
    port: Option<u16>,
    /// Listen host override
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    concierge::init_logging();

    let cli = Cli::parse();
    info!(
        "starting concierge (config_set={}, port_set={}, host_set={})",
        cli.config.is_some(),
        cli.port.is_some(),
        cli.host.is_some()
    );
    let mut config = if let Some(path) = cli.config.as_ref() {
        ConciergeConfig::load_from_path(path).context("failed to load config")?
    } else {
        ConciergeConfig::default()
    };
    config.apply_env_overrides();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    config.validate().context("invalid config")?;

    let store =
        SessionStore::new(&config.sessions.path).context("failed to open session store")?;
    let provider = GroqClient::new(&config.provider).context("failed to build provider client")?;
    let server_config = config.server.clone();
    let orchestrator = Arc::new(Orchestrator::new(config, store, Arc::new(provider)));
    let state = Arc::new(AppState { orchestrator });

    concierge::server::serve(&server_config, state)
        .await
        .context("server error")?;
    Ok(())
}

//! Hunter agent binary.
//!
//! ```bash
//! hunter <host> <port> [<name>] [<password>]
//!
//! # Faster schedulers and a custom policy file
//! HUNTER_RESTOCK_SECS=20 HUNTER_CONFIG=hunter.toml hunter localhost 25565 Guard01
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};

use hunter_client::{ClientConfig, ConnectTarget, USAGE, dirs, logging, session};
use hunter_content::{ConfigLoader, ItemCatalog};
use hunter_core::AgentConfig;
use runtime::FileAnchorRepository;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let target = match ConnectTarget::from_args(&args) {
        Ok(target) => target,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env();

    // 2. Setup logging
    let log_dir = client_config.log_dir.clone().unwrap_or_else(dirs::log_dir);
    logging::setup_logging(&log_dir, &target.name)?;

    let agent_config = match &client_config.config_path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("failed to load agent config from {}", path.display()))?,
        None => AgentConfig::default(),
    };
    tracing::info!(
        idle_policy = %agent_config.idle_policy,
        guard_radius = agent_config.guard_radius,
        "Agent config loaded"
    );

    // 3. Anchor store, one directory per agent name
    let data_dir = client_config
        .data_dir
        .clone()
        .unwrap_or_else(dirs::data_dir)
        .join(&target.name);
    let anchors = FileAnchorRepository::new(&data_dir)
        .with_context(|| format!("failed to open anchor store in {}", data_dir.display()))?;
    tracing::info!("Guard anchor file: {}", anchors.path().display());

    // 4. Run
    let catalog = ItemCatalog::builtin()?;
    let runtime_config = client_config.runtime_config(agent_config);
    session::run(&target, runtime_config, catalog, anchors).await?;

    tracing::info!("Session closed");
    Ok(ExitCode::SUCCESS)
}

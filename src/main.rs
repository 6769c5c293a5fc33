//! SensorGrid - Main Entry Point
//!
//! Runs a full sampling run with the default (or a TOML-file) configuration
//! and logs one report per epoch.

use sensorgrid_rs::{config::EngineConfig, coordinator::Coordinator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sensorgrid_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A single optional argument names a TOML config file; anything more is
    // out of scope here.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            EngineConfig::load(&path)?
        }
        None => EngineConfig::default(),
    };

    Coordinator::run(&config)?;

    tracing::info!("All epochs reported");
    Ok(())
}

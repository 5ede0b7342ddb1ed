//! snake-actor - plays snake episodes on a grid
//!
//! Each turn:
//! 1. Looks for a shortest path to the food and follows it when it is short
//! 2. Otherwise runs an MCTS search over the moves that avoid a collision
//!
//! Run statistics are written to `<data_dir>/actor_stats.json`.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod actor;
mod config;
mod stats;
mod turn_policy;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let actor = Actor::new(config)?;

    match actor.run() {
        Ok(()) => {
            info!("Actor completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}

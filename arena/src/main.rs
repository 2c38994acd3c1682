//! Arena - Connect 4 strategy evaluation
//!
//! Plays paired games between two move-selection strategies:
//! 1. Loads settings from CLI flags, `CONNECT4_*` env vars and config.toml
//! 2. Plays `games` pairs, swapping colours within each pair
//! 3. Logs the running win rate of `player0` and optionally writes a JSON report

use anyhow::Result;
use std::path::Path;
use tracing::{error, info};

mod arena;
mod config;
mod strategy;

use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn run(config: &Config) -> Result<arena::ArenaReport> {
    let mut strategies = [
        strategy::from_name(&config.player0, config, config.seed)?,
        strategy::from_name(&config.player1, config, config.seed.wrapping_add(1))?,
    ];

    let report = arena::evaluate(&mut strategies, config.games)?;

    if let Some(path) = &config.report_path {
        arena::write_report(&report, Path::new(path))?;
    }

    Ok(report)
}

fn main() -> Result<()> {
    let config = Config::load();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    match config.iterations {
        Some(iterations) => info!(iterations, "Search budget per move"),
        None => info!(time_budget_ms = config.time_budget_ms, "Search budget per move"),
    }
    info!(
        pairs = config.games,
        seed = config.seed,
        "Starting arena: {} vs {}",
        config.player0,
        config.player1
    );

    match run(&config) {
        Ok(report) => {
            println!(
                "Winning rate of {} to {}:\t{:.4}",
                report.player0, report.player1, report.win_rate
            );
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {}", e);
            Err(e)
        }
    }
}

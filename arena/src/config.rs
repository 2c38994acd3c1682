//! Configuration for the arena harness
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::strategy::STRATEGY_NAMES;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_player0() -> String {
    CENTRAL_CONFIG.arena.player0.clone()
}

fn default_player1() -> String {
    CENTRAL_CONFIG.arena.player1.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_draw_exploration() -> f64 {
    CENTRAL_CONFIG.search.draw_exploration
}

fn default_draw_bias() -> bool {
    CENTRAL_CONFIG.search.draw_bias
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Connect 4 arena - paired self-play between two strategies")]
#[command(
    long_about = "Plays two move-selection strategies against each other, swapping colours
every pair of games, and reports the score fraction of player0.

Strategies: random, mcts (mode from --draw-bias), mcts-plain, mcts-draw.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of game pairs to play (each pair swaps colours)
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Strategy under evaluation
    #[arg(long, default_value_t = default_player0())]
    pub player0: String,

    /// Opponent strategy
    #[arg(long, default_value_t = default_player1())]
    pub player1: String,

    /// Seed for the strategies' random generators
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// UCB1 exploration constant for plain search
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// UCB1 exploration constant for draw-biased search
    #[arg(long, default_value_t = default_draw_exploration())]
    pub draw_exploration: f64,

    /// Whether the `mcts` strategy searches in draw-biased mode
    #[arg(long, default_value_t = default_draw_bias(), action = ArgAction::Set)]
    pub draw_bias: bool,

    /// Thinking time per move in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Fixed iterations per move; replaces the time budget when set
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Write the JSON report to this path
    #[arg(long)]
    pub report_path: Option<String>,
}

impl Config {
    /// Parse the command line, filling unset optional flags from config.toml.
    pub fn load() -> Self {
        let mut config = Self::parse();
        config.iterations = config.iterations.or(CENTRAL_CONFIG.search.iterations);
        config.report_path = config
            .report_path
            .or_else(|| CENTRAL_CONFIG.arena.report_path.clone());
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        for name in [&self.player0, &self.player1] {
            if !STRATEGY_NAMES.contains(&name.as_str()) {
                return Err(anyhow!(
                    "unknown strategy '{}', expected one of {}",
                    name,
                    STRATEGY_NAMES.join(", ")
                ));
            }
        }

        for (label, value) in [
            ("exploration", self.exploration),
            ("draw_exploration", self.draw_exploration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number", label));
            }
        }

        match self.iterations {
            Some(0) => return Err(anyhow!("iterations must be greater than 0")),
            None if self.time_budget_ms == 0 => {
                return Err(anyhow!("time_budget_ms must be greater than 0"));
            }
            _ => {}
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Search configuration for an MCTS strategy in the given mode.
    pub fn mcts_config(&self, draw_bias: bool) -> MctsConfig {
        let config = if draw_bias {
            MctsConfig::draw_biased().with_exploration(self.draw_exploration)
        } else {
            MctsConfig::plain().with_exploration(self.exploration)
        };
        match self.iterations {
            Some(iterations) => config.with_iterations(iterations),
            None => config.with_time_budget(self.time_budget()),
        }
    }
}

//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_draw_exploration() -> f64 {
    defaults::draw_exploration()
}
fn d_draw_bias() -> bool {
    defaults::draw_bias()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_player0() -> String {
    defaults::player0().into()
}
fn d_player1() -> String {
    defaults::player1().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Seed for every random generator in a run
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Tree search settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// UCB1 exploration constant for plain search
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// UCB1 exploration constant for draw-biased search
    #[serde(default = "d_draw_exploration")]
    pub draw_exploration: f64,
    #[serde(default = "d_draw_bias")]
    pub draw_bias: bool,
    /// Wall-clock budget per move in milliseconds
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Fixed iteration budget; takes precedence over the time budget
    #[serde(default)]
    pub iterations: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: defaults::exploration(),
            draw_exploration: defaults::draw_exploration(),
            draw_bias: defaults::draw_bias(),
            time_budget_ms: defaults::time_budget_ms(),
            iterations: None,
        }
    }
}

/// Self-play harness settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of game pairs; each pair is played once from each seat
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_player0")]
    pub player0: String,
    #[serde(default = "d_player1")]
    pub player1: String,
    /// Where to write the JSON report, if anywhere
    #[serde(default)]
    pub report_path: Option<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            player0: defaults::player0().into(),
            player1: defaults::player1().into(),
            report_path: None,
        }
    }
}

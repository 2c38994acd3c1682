//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! documented defaults cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    exploration: f64,
    draw_exploration: f64,
    draw_bias: bool,
    time_budget_ms: u64,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    player0: String,
    player1: String,
}

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Search
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn draw_exploration() -> f64 {
    DEFAULTS.search.draw_exploration
}
pub fn draw_bias() -> bool {
    DEFAULTS.search.draw_bias
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.search.time_budget_ms
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn player0() -> &'static str {
    &DEFAULTS.arena.player0
}
pub fn player1() -> &'static str {
    &DEFAULTS.arena.player1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        assert_eq!(log_level(), "info");
        assert_eq!(seed(), 42);
    }

    #[test]
    fn test_search_defaults() {
        assert!((exploration() - 1.0).abs() < f64::EPSILON);
        assert!((draw_exploration() - 3.0).abs() < f64::EPSILON);
        assert!(!draw_bias());
        assert_eq!(time_budget_ms(), 100);
    }

    #[test]
    fn test_arena_defaults() {
        assert_eq!(games(), 10);
        assert_eq!(player0(), "mcts");
        assert_eq!(player1(), "random");
    }
}

//! Configuration loading logic.
//!
//! Locates config.toml, parses it, and applies `CONNECT4_*` overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Env var naming an explicit config file.
const CONFIG_PATH_VAR: &str = "CONNECT4_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a member crate)
];

/// Find the config file to load, if any.
///
/// `CONNECT4_CONFIG` wins when it names an existing file; otherwise the
/// first existing entry of [`CONFIG_SEARCH_PATHS`] is used.
fn locate_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_VAR, path.display());
            return Some(path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_VAR,
            path.display()
        );
    }

    let found = CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists());
    if let Some(path) = &found {
        info!("Loading config from {}", path.display());
    }
    found
}

/// Load the central configuration.
///
/// Reads the located config.toml (see [`CONFIG_SEARCH_PATHS`]), falls back to
/// the built-in defaults when none exists, then applies env overrides.
pub fn load_config() -> CentralConfig {
    match locate_config() {
        Some(path) => load_from_path(&path),
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the defaults with a warning.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
        .and_then(|content| {
            toml::from_str::<CentralConfig>(&content)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
        });

    let config = parsed.unwrap_or_else(|reason| {
        warn!("{}, using defaults", reason);
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

fn env_key(section: &str, key: &str) -> String {
    format!("CONNECT4_{}_{}", section, key)
}

fn env_string(section: &str, key: &str) -> Option<String> {
    std::env::var(env_key(section, key)).ok()
}

/// Parsed value of `CONNECT4_<SECTION>_<KEY>`; unparseable values are ignored.
fn env_parsed<T: FromStr>(section: &str, key: &str) -> Option<T> {
    let name = env_key(section, key);
    let raw = std::env::var(&name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECT4_<SECTION>_<KEY>.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    let common = &mut config.common;
    if let Some(v) = env_string("COMMON", "LOG_LEVEL") {
        common.log_level = v;
    }
    if let Some(v) = env_parsed("COMMON", "SEED") {
        common.seed = v;
    }

    let search = &mut config.search;
    if let Some(v) = env_parsed("SEARCH", "EXPLORATION") {
        search.exploration = v;
    }
    if let Some(v) = env_parsed("SEARCH", "DRAW_EXPLORATION") {
        search.draw_exploration = v;
    }
    if let Some(v) = env_parsed("SEARCH", "DRAW_BIAS") {
        search.draw_bias = v;
    }
    if let Some(v) = env_parsed("SEARCH", "TIME_BUDGET_MS") {
        search.time_budget_ms = v;
    }
    if let Some(v) = env_parsed("SEARCH", "ITERATIONS") {
        search.iterations = Some(v);
    }

    let arena = &mut config.arena;
    if let Some(v) = env_parsed("ARENA", "GAMES") {
        arena.games = v;
    }
    if let Some(v) = env_string("ARENA", "PLAYER0") {
        arena.player0 = v;
    }
    if let Some(v) = env_string("ARENA", "PLAYER1") {
        arena.player1 = v;
    }
    if let Some(v) = env_string("ARENA", "REPORT_PATH") {
        arena.report_path = Some(v);
    }

    config
}

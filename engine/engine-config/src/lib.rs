//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the search engine and the `arena` harness.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`CONNECT4_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults from config.defaults.toml
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECT4_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECT4_COMMON_SEED=7
//!     CONNECT4_SEARCH_DRAW_BIAS=true
//!     CONNECT4_SEARCH_ITERATIONS=5000
//!     CONNECT4_ARENA_GAMES=50
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

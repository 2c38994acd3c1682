//! Move-selection strategies for the arena

use anyhow::{anyhow, Result};
use games_connect4::BitBoard;
use mcts::{search_for_budget, MctsConfig};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

use crate::config::Config;

/// Names accepted by [`from_name`].
pub const STRATEGY_NAMES: &[&str] = &["random", "mcts", "mcts-plain", "mcts-draw"];

/// Picks a column for the side to move.
pub trait Strategy {
    /// Label used in logs and reports.
    fn name(&self) -> &str;

    /// Choose a column for the side to move on an unfinished `board`.
    fn choose(&mut self, board: &BitBoard) -> u8;
}

/// Uniformly random legal column.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, board: &BitBoard) -> u8 {
        let moves = board.legal_moves();
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Fresh tree search on every move.
#[derive(Debug)]
pub struct MctsStrategy {
    name: String,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl MctsStrategy {
    pub fn new(name: impl Into<String>, config: MctsConfig, seed: u64) -> Self {
        Self {
            name: name.into(),
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for MctsStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, board: &BitBoard) -> u8 {
        search_for_budget(board, &self.config, &mut self.rng)
    }
}

/// Build the strategy registered under `name`.
pub fn from_name(name: &str, config: &Config, seed: u64) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match name {
        "random" => Box::new(RandomStrategy::with_seed(seed)),
        "mcts" => Box::new(MctsStrategy::new(
            name,
            config.mcts_config(config.draw_bias),
            seed,
        )),
        "mcts-plain" => Box::new(MctsStrategy::new(name, config.mcts_config(false), seed)),
        "mcts-draw" => Box::new(MctsStrategy::new(name, config.mcts_config(true), seed)),
        other => {
            return Err(anyhow!(
                "unknown strategy '{}', expected one of {}",
                other,
                STRATEGY_NAMES.join(", ")
            ))
        }
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            games: 1,
            player0: "mcts".into(),
            player1: "random".into(),
            seed: 42,
            log_level: "info".into(),
            exploration: 1.0,
            draw_exploration: 3.0,
            draw_bias: true,
            time_budget_ms: 100,
            iterations: Some(50),
            report_path: None,
        }
    }

    #[test]
    fn random_strategy_picks_legal_columns() {
        let mut strategy = RandomStrategy::with_seed(42);
        let mut board = BitBoard::new();
        // Fill column 3 so it is never legal
        for _ in 0..6 {
            board.play(3);
        }

        for _ in 0..50 {
            let column = strategy.choose(&board);
            assert_ne!(column, 3);
            assert!(board.legal_mask() & (1 << column) != 0);
        }
    }

    #[test]
    fn random_strategy_is_deterministic_per_seed() {
        let board = BitBoard::new();
        let mut a = RandomStrategy::with_seed(12345);
        let mut b = RandomStrategy::with_seed(12345);
        for _ in 0..20 {
            assert_eq!(a.choose(&board), b.choose(&board));
        }
    }

    #[test]
    fn mcts_strategy_takes_immediate_win() {
        let mut board = BitBoard::new();
        for col in [0, 1, 0, 1, 0, 6] {
            board.play(col);
        }
        let config = MctsConfig::plain().with_iterations(2_000);
        let mut strategy = MctsStrategy::new("mcts", config, 42);
        assert_eq!(strategy.choose(&board), 0);
    }

    #[test]
    fn from_name_builds_each_strategy() {
        let config = test_config();
        for name in STRATEGY_NAMES {
            let strategy = from_name(name, &config, 7).unwrap();
            assert_eq!(strategy.name(), *name);
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        let err = from_name("alphabeta", &test_config(), 0).err().unwrap();
        assert!(err.to_string().contains("unknown strategy 'alphabeta'"));
    }
}

//! Budgeted MCTS driver.
//!
//! The driver owns the tree, force-expands the root, and then calls
//! [`MctsTree::evaluate`] on the root until the budget runs out. The deadline
//! is only checked between root iterations.

use std::time::{Duration, Instant};

use games_connect4::{BitBoard, COLS};
use rand::Rng;
use tracing::debug;

use crate::config::{Budget, MctsConfig};
use crate::playout::{Playout, RandomPlayout};
use crate::tree::{ChildSummary, MctsTree, TreeStats};

/// Result of a budgeted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Most visited root column
    pub column: u8,

    /// Root iterations performed by this search so far
    pub iterations: u32,

    /// Wall-clock time spent in the last `run`
    pub elapsed: Duration,

    /// Visits per column at the root (0 for illegal columns)
    pub visits: [u32; COLS],
}

/// MCTS search state. Keeps its tree between calls so a search can be
/// continued in small steps.
#[derive(Debug, Clone)]
pub struct MctsSearch<P: Playout = RandomPlayout> {
    tree: MctsTree,
    config: MctsConfig,
    playout: P,
    iterations: u32,
}

impl MctsSearch<RandomPlayout> {
    /// Create a new search from `board` with random playouts.
    ///
    /// # Panics
    ///
    /// If `board` is a finished game.
    pub fn new(board: BitBoard, config: MctsConfig) -> Self {
        Self::with_playout(board, config, RandomPlayout)
    }
}

impl<P: Playout> MctsSearch<P> {
    /// Create a new search with a custom playout policy.
    ///
    /// # Panics
    ///
    /// If `board` is a finished game.
    pub fn with_playout(board: BitBoard, config: MctsConfig, playout: P) -> Self {
        assert!(
            !board.is_done(),
            "cannot search a finished game ({:?})",
            board.outcome()
        );

        let mut tree = MctsTree::new(board);
        tree.expand(tree.root());

        Self {
            tree,
            config,
            playout,
            iterations: 0,
        }
    }

    /// Run one evaluation from the root.
    pub fn iterate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let root = self.tree.root();
        self.tree.evaluate(
            root,
            self.config.root_bias(),
            self.config.exploration,
            &self.playout,
            rng,
        );
        self.iterations += 1;
    }

    /// Run exactly `iterations` more root evaluations.
    pub fn run_iterations<R: Rng + ?Sized>(&mut self, iterations: u32, rng: &mut R) {
        for _ in 0..iterations {
            self.iterate(rng);
        }
    }

    /// Keep starting root evaluations until `budget` has elapsed.
    /// Returns the number of evaluations run.
    pub fn run_for<R: Rng + ?Sized>(&mut self, budget: Duration, rng: &mut R) -> u32 {
        let start = Instant::now();
        let mut count = 0;
        while start.elapsed() < budget {
            self.iterate(rng);
            count += 1;
        }
        count
    }

    /// Spend the configured budget and report the chosen column.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SearchResult {
        let start = Instant::now();
        match self.config.budget {
            Budget::Iterations(n) => self.run_iterations(n, rng),
            Budget::Deadline(budget) => {
                self.run_for(budget, rng);
            }
        }
        let elapsed = start.elapsed();

        let column = self.best_move();
        let visits = self.visit_counts();
        debug!(
            iterations = self.iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            column,
            draw_bias = self.config.draw_bias,
            ?visits,
            "MCTS search complete"
        );

        SearchResult {
            column,
            iterations: self.iterations,
            elapsed,
            visits,
        }
    }

    /// Column of the most visited root child, earliest on ties.
    pub fn best_move(&self) -> u8 {
        self.tree.best_action().0
    }

    /// Visits per column at the root.
    pub fn visit_counts(&self) -> [u32; COLS] {
        self.tree.visit_counts()
    }

    /// Per-child statistics at the root.
    pub fn root_summary(&self) -> Vec<ChildSummary> {
        self.tree.root_summary(self.config.root_bias())
    }

    /// Get statistics about the search tree.
    pub fn root_stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Position being searched.
    pub fn board(&self) -> &BitBoard {
        &self.tree.get(self.tree.root()).board
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Root evaluations run so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function: search `board` within `config.budget` and return
/// the recommended column.
///
/// # Panics
///
/// If `board` is a finished game.
pub fn search_for_budget<R: Rng + ?Sized>(board: &BitBoard, config: &MctsConfig, rng: &mut R) -> u8 {
    MctsSearch::new(*board, config.clone()).run(rng).column
}

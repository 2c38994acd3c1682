//! Game session facade.
//!
//! Holds one game in progress together with the generator used by searches,
//! and an optional search tree that is kept alive across
//! [`GameSession::proceed_search`] calls while the position does not change.

use std::time::Duration;

use games_connect4::{BitBoard, MoveError, Player, BOARD_SIZE, COLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::config::{MctsConfig, DEFAULT_EXPLORATION, DRAW_EXPLORATION};
use crate::search::MctsSearch;

/// Errors returned by [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("the game is over, there is nothing to search")]
    GameOver,
}

/// One game of Connect 4 with search assistance.
#[derive(Debug)]
pub struct GameSession<R = ChaCha20Rng> {
    board: BitBoard,
    rng: R,
    exploration: f64,
    draw_exploration: f64,
    /// Tree reused by `proceed_search`; dropped whenever the position changes
    assist: Option<MctsSearch>,
}

impl GameSession<ChaCha20Rng> {
    /// New session with a generator seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// New session drawing all search randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            board: BitBoard::new(),
            rng,
            exploration: DEFAULT_EXPLORATION,
            draw_exploration: DRAW_EXPLORATION,
            assist: None,
        }
    }

    /// Builder pattern: exploration constants for plain and draw-biased
    /// searches.
    pub fn with_exploration(mut self, plain: f64, draw_biased: f64) -> Self {
        self.exploration = plain;
        self.draw_exploration = draw_biased;
        self
    }

    /// Reset to an empty board.
    pub fn start(&mut self) {
        self.board = BitBoard::new();
        self.assist = None;
    }

    /// Apply a move for the player to move.
    pub fn play(&mut self, column: u8) -> Result<(), SessionError> {
        self.board.try_play(column)?;
        self.assist = None;
        Ok(())
    }

    /// Seat tags row-major, bottom row first (0 empty, 1 first, 2 second).
    pub fn board(&self) -> [u8; BOARD_SIZE] {
        let mut buf = [0; BOARD_SIZE];
        self.board.fill_board(&mut buf);
        buf
    }

    /// Current position.
    pub fn position(&self) -> &BitBoard {
        &self.board
    }

    /// Bit i set when column i is playable. 0 once the game is over.
    pub fn legal_mask(&self) -> u8 {
        if self.board.is_done() {
            0
        } else {
            self.board.legal_mask()
        }
    }

    /// Seat to move.
    pub fn turn(&self) -> Player {
        self.board.to_move()
    }

    pub fn is_done(&self) -> bool {
        self.board.is_done()
    }

    /// Winning seat once the game ended with a line.
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    fn config(&self, draw_bias: bool) -> MctsConfig {
        if draw_bias {
            MctsConfig::draw_biased().with_exploration(self.draw_exploration)
        } else {
            MctsConfig::plain().with_exploration(self.exploration)
        }
    }

    /// Fresh search for the player to move within `budget`.
    /// Leaves the assistance tree alone.
    pub fn search_move(&mut self, budget: Duration, draw_bias: bool) -> Result<u8, SessionError> {
        if self.board.is_done() {
            return Err(SessionError::GameOver);
        }
        let config = self.config(draw_bias).with_time_budget(budget);
        let result = MctsSearch::new(self.board, config).run(&mut self.rng);
        Ok(result.column)
    }

    /// Grow the assistance tree by `iterations` and return the root visit
    /// counts per column.
    ///
    /// The tree survives between calls as long as no move is played and the
    /// draw-bias flag stays the same.
    pub fn proceed_search(
        &mut self,
        iterations: u32,
        draw_bias: bool,
    ) -> Result<[u32; COLS], SessionError> {
        if self.board.is_done() {
            return Err(SessionError::GameOver);
        }

        let search = match self.assist.take() {
            Some(search) if search.config().draw_bias == draw_bias => search,
            _ => MctsSearch::new(self.board, self.config(draw_bias)),
        };
        let search = self.assist.insert(search);
        search.run_iterations(iterations, &mut self.rng);
        Ok(search.visit_counts())
    }
}

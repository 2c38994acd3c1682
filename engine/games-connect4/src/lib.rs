//! Connect 4 position encoding for the search engine
//!
//! Connect 4 is a two-player connection game where players drop discs into a
//! 7-column, 6-row vertically suspended grid. The objective is to be the first
//! to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! [`BitBoard`] packs the grid column-major into a `u64`, one column per
//! `ROWS + 1` bits with row 0 at the bottom. The top bit of every column is a
//! sentinel that is never set by a real move:
//! ```text
//! Row 6: [ 6][13][20][27][34][41][48]  <- sentinel
//! Row 5: [ 5][12][19][26][33][40][47]  <- Top
//! Row 4: [ 4][11][18][25][32][39][46]
//! Row 3: [ 3][10][17][24][31][38][45]
//! Row 2: [ 2][ 9][16][23][30][37][44]
//! Row 1: [ 1][ 8][15][22][29][36][43]
//! Row 0: [ 0][ 7][14][21][28][35][42]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Positions are mover-relative: "my stones" are always the stones of the
//! player about to move, and every move swaps perspective.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{BitBoard, Outcome};
//!
//! let mut board = BitBoard::new();
//! assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
//!
//! board.play(3);
//! assert_eq!(board.outcome(), Outcome::InProgress);
//! ```

use thiserror::Error;

mod bitboard;
mod grid;

pub use bitboard::{has_four, BitBoard};
pub use grid::GridBoard;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Bits reserved per column: the playable rows plus one sentinel.
pub const COL_STRIDE: usize = ROWS + 1;

/// One of the two seats at the table. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// 0 for the first player, 1 for the second.
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Cell tag used in rendering buffers (1 = first, 2 = second).
    pub fn tag(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Diagram character (`x` = first, `o` = second).
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'x',
            Player::Second => 'o',
        }
    }
}

/// Game result, always stated from the perspective of the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Ternary value for the player to move: 1.0 win, 0.0 loss, 0.5 draw.
    /// `None` while the game is still running.
    pub fn value(self) -> Option<f64> {
        match self {
            Outcome::InProgress => None,
            Outcome::Win => Some(1.0),
            Outcome::Lose => Some(0.0),
            Outcome::Draw => Some(0.5),
        }
    }
}

/// Rejected move at an API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {0} is out of range (0-{max})", max = COLS - 1)]
    OutOfRange(u8),

    #[error("column {0} is full")]
    ColumnFull(u8),

    #[error("the game is already over")]
    GameOver,
}

/// Failure to read a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unexpected character {ch:?} in row {row}")]
    BadCell { row: usize, ch: char },

    #[error("stone at column {col}, row {row} is floating above an empty cell")]
    FloatingStone { col: usize, row: usize },
}

#[cfg(test)]
mod tests;

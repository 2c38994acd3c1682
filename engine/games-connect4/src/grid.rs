//! Reference board with one byte per cell.
//!
//! Slow but obvious: it scans outward from the placed stone to find lines.
//! Only used to cross-check [`BitBoard`].

use std::fmt;

use crate::{BitBoard, Outcome, Player, BOARD_SIZE, COLS, COL_STRIDE, ROWS};

/// Connect 4 position stored cell by cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    /// 0=empty, 1=first player, 2=second player.
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Seat to move
    current: Player,
    /// Result from the point of view of `current`
    outcome: Outcome,
    /// Stones in each column
    column_heights: [u8; COLS],
}

impl GridBoard {
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current: Player::First,
            outcome: Outcome::InProgress,
            column_heights: [0; COLS],
        }
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn to_move(&self) -> Player {
        self.current
    }

    /// Seat tag of a cell (0 = empty, 1 = first, 2 = second).
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.board[Self::pos(col, row)]
    }

    /// Columns that are not full, ascending.
    pub fn legal_moves(&self) -> Vec<u8> {
        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Drop a stone for the player to move.
    ///
    /// # Panics
    ///
    /// If the game is over or the column cannot take a stone.
    pub fn play(&mut self, column: u8) {
        let col = column as usize;
        assert!(!self.is_done(), "play({column}) on a finished game");
        assert!(
            col < COLS && self.column_heights[col] < ROWS as u8,
            "column {column} is not playable"
        );

        let row = self.column_heights[col] as usize;
        self.board[Self::pos(col, row)] = self.current.tag();
        self.column_heights[col] += 1;

        let completed_line = self.line_through(col, row);
        self.current = self.current.opponent();

        if completed_line {
            // The line belongs to the player who just moved
            self.outcome = Outcome::Lose;
        } else if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            self.outcome = Outcome::Draw;
        }
    }

    /// Check if the stone at (col, row) is part of four in a row
    fn line_through(&self, col: usize, row: usize) -> bool {
        let player = self.board[Self::pos(col, row)];
        if player == 0 {
            return false;
        }

        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        directions.iter().any(|&(dc, dr)| {
            let count = 1
                + self.run_length(col, row, dc, dr, player)
                + self.run_length(col, row, -dc, -dr, player);
            count >= 4
        })
    }

    /// Stones of `player` strictly beyond (col, row) along (dc, dr).
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, player: u8) -> usize {
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        let mut count = 0;
        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.board[Self::pos(c as usize, r as usize)] != player {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

impl Default for GridBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&GridBoard> for BitBoard {
    fn from(grid: &GridBoard) -> Self {
        let mut mover = 0u64;
        let mut occupied = 0u64;
        for col in 0..COLS {
            for row in 0..ROWS {
                let tag = grid.cell(col, row);
                if tag == 0 {
                    continue;
                }
                let bit = 1u64 << (col * COL_STRIDE + row);
                occupied |= bit;
                if tag == grid.current.tag() {
                    mover |= bit;
                }
            }
        }
        BitBoard::from_bits(mover, occupied, grid.current == Player::First)
    }
}

impl fmt::Display for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "to move: {}", self.current.symbol())?;
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let ch = match self.cell(col, row) {
                    1 => Player::First.symbol(),
                    2 => Player::Second.symbol(),
                    _ => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_grid() {
        let grid = GridBoard::new();
        assert_eq!(grid.to_move(), Player::First);
        assert_eq!(grid.legal_moves(), (0..COLS as u8).collect::<Vec<_>>());
        assert!(!grid.is_done());
    }

    #[test]
    fn test_grid_vertical_line() {
        let mut grid = GridBoard::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            grid.play(col);
        }
        assert_eq!(grid.outcome(), Outcome::Lose);
        assert_eq!(grid.to_move(), Player::Second);
    }

    #[test]
    #[should_panic(expected = "not playable")]
    fn test_grid_full_column_panics() {
        let mut grid = GridBoard::new();
        for _ in 0..=ROWS {
            grid.play(3);
        }
    }
}

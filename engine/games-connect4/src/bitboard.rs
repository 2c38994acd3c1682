//! Mover-relative bitboard.
//!
//! Two `u64` words describe a position: the stones of the player to move and
//! every occupied cell. The opponent's stones are `occupied ^ mover`. Cell
//! `(col, row)` lives at bit `col * COL_STRIDE + row`.

use std::fmt;

use crate::{MoveError, Outcome, ParseError, Player, COLS, COL_STRIDE, ROWS};

/// Lowest cell of every column.
const BOTTOM_MASK: u64 = bottom_mask();

/// Every playable cell (sentinels excluded).
const FULL_MASK: u64 = full_mask();

/// Playable cells of a single column.
const COLUMN_BITS: u64 = (1 << ROWS) - 1;

/// Shift distances for the four line directions.
const HORIZONTAL: usize = COL_STRIDE;
const VERTICAL: usize = 1;
const DIAGONAL_DOWN: usize = ROWS; // "\"
const DIAGONAL_UP: usize = ROWS + 2; // "/"

const fn bottom_mask() -> u64 {
    let mut mask = 0;
    let mut col = 0;
    while col < COLS {
        mask |= 1 << (col * COL_STRIDE);
        col += 1;
    }
    mask
}

const fn full_mask() -> u64 {
    let mut mask = 0;
    let mut col = 0;
    while col < COLS {
        mask |= COLUMN_BITS << (col * COL_STRIDE);
        col += 1;
    }
    mask
}

#[inline]
const fn column_mask(col: usize) -> u64 {
    COLUMN_BITS << (col * COL_STRIDE)
}

#[inline]
const fn cell_bit(col: usize, row: usize) -> u64 {
    1 << (col * COL_STRIDE + row)
}

/// True if `bits` holds four connected cells in any direction.
///
/// Each direction ANDs the board with itself shifted by the stride, which
/// leaves pairs, then ANDs that with itself shifted by twice the stride. The
/// strides only line up with the `ROWS + 1` bits-per-column layout.
#[inline]
pub fn has_four(bits: u64) -> bool {
    [HORIZONTAL, DIAGONAL_DOWN, DIAGONAL_UP, VERTICAL]
        .iter()
        .any(|&stride| {
            let pairs = bits & (bits >> stride);
            pairs & (pairs >> (2 * stride)) != 0
        })
}

/// Connect 4 position seen from the player about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard {
    /// Stones of the player to move
    mover: u64,
    /// Stones of both players
    occupied: u64,
    /// Whether the player to move is the one who opened the game
    mover_is_first: bool,
    /// Result from the mover's point of view
    outcome: Outcome,
}

impl BitBoard {
    /// Empty board, first player to move.
    pub fn new() -> Self {
        Self {
            mover: 0,
            occupied: 0,
            mover_is_first: true,
            outcome: Outcome::InProgress,
        }
    }

    /// Build a position from six row strings, top row first.
    ///
    /// `x` marks a first-player stone, `o` a second-player stone and `.` an
    /// empty cell. The outcome is derived from the stones: a line of the
    /// side not to move is a loss for the mover, a full board a draw.
    pub fn from_rows(rows: &[&str], first_to_move: bool) -> Result<Self, ParseError> {
        if rows.len() != ROWS {
            return Err(ParseError::RowCount {
                expected: ROWS,
                got: rows.len(),
            });
        }

        let mut first = 0u64;
        let mut second = 0u64;
        for (i, line) in rows.iter().enumerate() {
            let row = ROWS - 1 - i;
            let width = line.chars().count();
            if width != COLS {
                return Err(ParseError::RowWidth {
                    row,
                    expected: COLS,
                    got: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    'x' => first |= cell_bit(col, row),
                    'o' => second |= cell_bit(col, row),
                    '.' => {}
                    _ => return Err(ParseError::BadCell { row, ch }),
                }
            }
        }

        let occupied = first | second;
        for col in 0..COLS {
            let column = (occupied & column_mask(col)) >> (col * COL_STRIDE);
            // Stones stack from the bottom, so a column is a run of low bits.
            if column & (column + 1) != 0 {
                let gap = column.trailing_ones() as usize;
                let row = gap + (column >> gap).trailing_zeros() as usize;
                return Err(ParseError::FloatingStone { col, row });
            }
        }

        let mover = if first_to_move { first } else { second };
        Ok(Self::from_bits(mover, occupied, first_to_move))
    }

    /// Assemble a position from raw words, deriving its outcome.
    pub(crate) fn from_bits(mover: u64, occupied: u64, mover_is_first: bool) -> Self {
        debug_assert_eq!(mover & !occupied, 0, "mover stones must be occupied");
        debug_assert_eq!(occupied & !FULL_MASK, 0, "sentinel bits must stay clear");

        let outcome = if has_four(occupied ^ mover) {
            Outcome::Lose
        } else if has_four(mover) {
            Outcome::Win
        } else if occupied == FULL_MASK {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };

        Self {
            mover,
            occupied,
            mover_is_first,
            outcome,
        }
    }

    /// Drop a stone for the player to move and hand the turn over.
    ///
    /// # Panics
    ///
    /// If the game is over, `column` is out of range, or the column is full.
    /// Callers take columns from [`legal_moves`](Self::legal_moves).
    pub fn play(&mut self, column: u8) {
        let col = column as usize;
        assert!(
            !self.outcome.is_terminal(),
            "play({column}) on a finished game"
        );
        assert!(col < COLS, "column {column} out of range");
        assert!(
            self.occupied & cell_bit(col, ROWS - 1) == 0,
            "column {column} is full"
        );

        // The opponent becomes the mover; the new stone lands on the side
        // that just moved.
        self.mover ^= self.occupied;
        self.mover_is_first = !self.mover_is_first;
        self.occupied |= self.occupied + cell_bit(col, 0);

        if has_four(self.mover ^ self.occupied) {
            self.outcome = Outcome::Lose;
        } else if self.occupied == FULL_MASK {
            self.outcome = Outcome::Draw;
        }
    }

    /// Checked variant of [`play`](Self::play) for untrusted input.
    pub fn try_play(&mut self, column: u8) -> Result<(), MoveError> {
        if self.is_done() {
            return Err(MoveError::GameOver);
        }
        if column as usize >= COLS {
            return Err(MoveError::OutOfRange(column));
        }
        if self.legal_mask() & (1 << column) == 0 {
            return Err(MoveError::ColumnFull(column));
        }
        self.play(column);
        Ok(())
    }

    /// Copy of this position with `column` played.
    #[inline]
    pub fn after(&self, column: u8) -> Self {
        let mut next = *self;
        next.play(column);
        next
    }

    /// Bit i set when column i can take another stone.
    ///
    /// Adding the bottom row to `occupied` carries into the lowest empty cell
    /// of each column, or into the sentinel when the column is full.
    #[inline]
    pub fn legal_mask(&self) -> u8 {
        let possible = self.occupied + BOTTOM_MASK;
        (0..COLS).fold(0u8, |mask, col| {
            if possible & column_mask(col) != 0 {
                mask | (1 << col)
            } else {
                mask
            }
        })
    }

    /// Playable columns in ascending order.
    pub fn legal_moves(&self) -> Vec<u8> {
        let mask = self.legal_mask();
        (0..COLS as u8).filter(|&col| mask & (1 << col) != 0).collect()
    }

    /// Result from the point of view of the player to move.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.outcome.is_terminal()
    }

    #[inline]
    pub fn mover_is_first(&self) -> bool {
        self.mover_is_first
    }

    /// Seat of the player to move.
    pub fn to_move(&self) -> Player {
        if self.mover_is_first {
            Player::First
        } else {
            Player::Second
        }
    }

    /// Stones of the player to move.
    #[inline]
    pub fn mover_bits(&self) -> u64 {
        self.mover
    }

    /// Stones of both players.
    #[inline]
    pub fn occupied_bits(&self) -> u64 {
        self.occupied
    }

    /// Stones of the player who moved last.
    #[inline]
    pub fn opponent_bits(&self) -> u64 {
        self.occupied ^ self.mover
    }

    pub fn moves_played(&self) -> u32 {
        self.occupied.count_ones()
    }

    /// Mover-relative tag: 0 = empty, 1 = player to move, 2 = opponent.
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        let bit = cell_bit(col, row);
        if self.mover & bit != 0 {
            1
        } else if self.occupied & bit != 0 {
            2
        } else {
            0
        }
    }

    /// Seat tag: 0 = empty, 1 = first player, 2 = second player.
    pub fn absolute_cell(&self, col: usize, row: usize) -> u8 {
        match self.cell(col, row) {
            0 => 0,
            1 => self.to_move().tag(),
            _ => self.to_move().opponent().tag(),
        }
    }

    /// Write seat tags row-major, bottom row first, for rendering.
    pub fn fill_board(&self, buf: &mut [u8; crate::BOARD_SIZE]) {
        for row in 0..ROWS {
            for col in 0..COLS {
                buf[row * COLS + col] = self.absolute_cell(col, row);
            }
        }
    }

    /// Winning seat, if the game ended with a line.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Win => Some(self.to_move()),
            Outcome::Lose => Some(self.to_move().opponent()),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// 1.0 if the first player won, 0.0 if they lost, 0.5 otherwise.
    pub fn first_player_score(&self) -> f64 {
        match self.winner() {
            Some(Player::First) => 1.0,
            Some(Player::Second) => 0.0,
            None => 0.5,
        }
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "to move: {}", self.to_move().symbol())?;
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let ch = match self.absolute_cell(col, row) {
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
    fn test_masks() {
        assert_eq!(BOTTOM_MASK.count_ones(), COLS as u32);
        assert_eq!(FULL_MASK.count_ones(), (ROWS * COLS) as u32);
        for col in 0..COLS {
            // Sentinel bit is outside the playable area
            assert_eq!(FULL_MASK & cell_bit(col, ROWS), 0);
        }
    }

    #[test]
    fn test_has_four_each_direction() {
        let horizontal = (0..4).fold(0, |b, c| b | cell_bit(c + 1, 2));
        let vertical = (0..4).fold(0, |b, r| b | cell_bit(4, r + 1));
        let rising = (0..4).fold(0, |b, i| b | cell_bit(i + 2, i));
        let falling = (0..4).fold(0, |b, i| b | cell_bit(i, 5 - i));

        assert!(has_four(horizontal));
        assert!(has_four(vertical));
        assert!(has_four(rising));
        assert!(has_four(falling));
    }

    #[test]
    fn test_has_four_rejects_gaps_and_wraps() {
        // Three in a row plus a gap
        let gapped = cell_bit(0, 0) | cell_bit(1, 0) | cell_bit(2, 0) | cell_bit(4, 0);
        assert!(!has_four(gapped));

        // Top of one column and bottom of the next are not vertical neighbours
        let wrapped = cell_bit(0, 4) | cell_bit(0, 5) | cell_bit(1, 0) | cell_bit(1, 1);
        assert!(!has_four(wrapped));

        assert!(!has_four(0));
    }

    #[test]
    fn test_sentinel_never_set() {
        let mut board = BitBoard::new();
        for _ in 0..ROWS {
            board.play(2);
        }
        assert_eq!(board.occupied_bits() & cell_bit(2, ROWS), 0);
        assert_eq!(board.legal_mask() & (1 << 2), 0);
    }
}

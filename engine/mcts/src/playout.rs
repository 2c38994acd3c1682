//! Playout policy used to score unexpanded leaves.
//!
//! A playout plays moves from a private copy of a position until the game
//! ends and reports the result from the point of view of the player to move
//! in the position it was given.

use games_connect4::BitBoard;
use rand::Rng;

/// Factor applied to every returning ply by the damped transform.
pub const DAMPING: f64 = 0.99;

/// Pull `value` towards the centre: `(value - mid) * 0.99 + 0.5`.
#[inline]
pub fn damp(value: f64, mid: f64) -> f64 {
    (value - mid) * DAMPING + 0.5
}

/// Trait for leaf evaluation by simulation.
///
/// Implementations must not touch the caller's board and must draw all
/// randomness from `rng`, so that a seeded generator reproduces a search.
pub trait Playout {
    /// Value of `board` for its player to move: 1.0 win, 0.0 loss, 0.5 draw
    /// before damping.
    ///
    /// With `mid` set, each ply on the way back is flipped and then damped
    /// with [`damp`]. Without it the value is only flipped.
    fn playout<R: Rng + ?Sized>(&self, board: &BitBoard, mid: Option<f64>, rng: &mut R) -> f64;
}

/// Uniformly random moves until the game ends.
///
/// Consumes exactly one `gen_range(0..legal_count)` per ply played.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayout;

impl RandomPlayout {
    pub fn new() -> Self {
        Self
    }
}

impl Playout for RandomPlayout {
    fn playout<R: Rng + ?Sized>(&self, board: &BitBoard, mid: Option<f64>, rng: &mut R) -> f64 {
        let mut state = *board;
        let mut plies = 0u32;
        while !state.is_done() {
            let mask = state.legal_mask();
            let pick = rng.gen_range(0..mask.count_ones());
            state.play(nth_set_bit(mask, pick));
            plies += 1;
        }

        // Unwind: one perspective flip per ply played
        let mut value = state.outcome().value().unwrap_or(0.5);
        for _ in 0..plies {
            value = 1.0 - value;
            if let Some(mid) = mid {
                value = damp(value, mid);
            }
        }
        value
    }
}

/// Index of the `n`-th set bit of `mask`, counting from bit 0.
#[inline]
fn nth_set_bit(mask: u8, n: u32) -> u8 {
    let mut bits = mask;
    for _ in 0..n {
        bits &= bits - 1;
    }
    bits.trailing_zeros() as u8
}

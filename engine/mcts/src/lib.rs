//! Monte Carlo Tree Search (MCTS) for Connect 4.
//!
//! The search runs on the mover-relative [`games_connect4::BitBoard`] and
//! scores leaves with random playouts.
//!
//! # Overview
//!
//! Every root iteration is one call to [`MctsTree::evaluate`], which recurses
//! down the tree:
//!
//! 1. **Terminal**: a finished position scores its outcome (1.0 win, 0.0 loss,
//!    0.5 draw for the player to move)
//! 2. **Leaf**: an unexpanded node scores a random playout and grows one child
//!    per legal move once it has been visited [`EXPAND_THRESHOLD`] times
//! 3. **Internal**: the node picks a child with UCB1, evaluates it, and flips
//!    the returned value once for the change of mover
//!
//! Each node records the value on the way back up. After the budget is spent
//! the most visited root child is the recommendation.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::BitBoard;
//! use mcts::{MctsConfig, MctsSearch};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = MctsConfig::plain().with_iterations(500);
//!
//! let mut search = MctsSearch::new(BitBoard::new(), config);
//! let result = search.run(&mut rng);
//!
//! assert!(result.column < 7);
//! assert_eq!(result.visits.iter().sum::<u32>(), 500);
//! ```
//!
//! # Draw-biased mode
//!
//! [`MctsConfig::draw_biased`] widens exploration to 3.0 and damps every
//! value towards 0.5 with `(v - mid) * 0.99 + 0.5`. The damping midpoint of
//! playouts alternates with depth (see [`DrawBias`]), and each node also
//! tracks a diagnostic p-value that selection never reads.
//!
//! # Determinism
//!
//! All randomness comes from the generator handed to the search. Playouts
//! draw one `gen_range(0..legal_count)` per ply, in evaluation order, so the
//! same seed, position and iteration budget always rebuild the same tree.

pub mod config;
pub mod node;
pub mod playout;
pub mod search;
pub mod session;
pub mod tree;

// Re-export main types
pub use config::{Budget, DrawBias, MctsConfig, EXPAND_THRESHOLD};
pub use node::{MctsNode, NodeId};
pub use playout::{damp, Playout, RandomPlayout};
pub use search::{search_for_budget, MctsSearch, SearchResult};
pub use session::{GameSession, SessionError};
pub use tree::{ChildSummary, MctsTree, TreeStats};

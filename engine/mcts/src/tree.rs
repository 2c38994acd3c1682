//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! The tree is strictly hierarchical: every node except the root is owned by
//! exactly one parent, and children are only ever appended by expansion.

use games_connect4::{BitBoard, COLS};
use rand::Rng;
use tracing::trace;

use crate::config::{DrawBias, EXPAND_THRESHOLD};
use crate::node::{MctsNode, NodeId};
use crate::playout::{damp, Playout};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree holding only the root position.
    pub fn new(root_board: BitBoard) -> Self {
        Self {
            nodes: vec![MctsNode::new(root_board)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Give a node one child per legal move, in legal-move order.
    ///
    /// # Panics
    ///
    /// If the node is terminal or already has children.
    pub fn expand(&mut self, id: NodeId) {
        let node = self.get(id);
        assert!(!node.is_expanded(), "node {} expanded twice", id.0);
        assert!(
            !node.is_terminal(),
            "node {} holds a finished game and cannot expand",
            id.0
        );

        let board = node.board;
        let children: Vec<(u8, NodeId)> = board
            .legal_moves()
            .into_iter()
            .map(|col| (col, self.allocate(MctsNode::new(board.after(col)))))
            .collect();

        trace!(node = id.0, children = children.len(), "Expanded node");
        self.get_mut(id).children = children;
    }

    /// Pick the child of an expanded node to descend into.
    ///
    /// Unvisited children come first, in order. Otherwise the child with the
    /// highest UCB1 score wins and ties go to the earliest child. Plain search
    /// flips the child's mean to the parent's view; draw-biased search stores
    /// it that way already.
    pub fn select_child(&self, id: NodeId, bias: DrawBias, exploration: f64) -> NodeId {
        let node = self.get(id);
        assert!(
            node.is_expanded(),
            "select_child on unexpanded node {}",
            id.0
        );

        if let Some(&(_, unvisited)) = node
            .children
            .iter()
            .find(|(_, child)| self.get(*child).visits == 0)
        {
            return unvisited;
        }

        let total: u32 = node
            .children
            .iter()
            .map(|(_, child)| self.get(*child).visits)
            .sum();
        let ln_total = (total as f64).ln();

        let mut best = node.children[0].1;
        let mut best_value = f64::NEG_INFINITY;
        for &(_, child_id) in &node.children {
            let child = self.get(child_id);
            let exploitation = if bias.is_off() {
                1.0 - child.mean_score()
            } else {
                child.mean_score()
            };
            let value = child.ucb1(exploitation, ln_total, exploration);
            if value > best_value {
                best = child_id;
                best_value = value;
            }
        }
        best
    }

    /// Run one evaluation through `id` and return its value for the player
    /// to move at `id`.
    ///
    /// Terminal nodes score their outcome. Leaves score a playout and expand
    /// once they reach [`EXPAND_THRESHOLD`] visits. Internal nodes descend
    /// into one child and flip the returned value once. Draw-biased levels
    /// damp the value around 0.5 before recording it.
    ///
    /// # Panics
    ///
    /// If an expanded node's child count no longer matches its legal moves.
    pub fn evaluate<P, R>(
        &mut self,
        id: NodeId,
        bias: DrawBias,
        exploration: f64,
        playout: &P,
        rng: &mut R,
    ) -> f64
    where
        P: Playout,
        R: Rng + ?Sized,
    {
        let node = self.get(id);
        let board = node.board;
        let visits = node.visits;
        let child_count = node.children.len();

        let mut expand_after = false;
        let value = if let Some(terminal) = board.outcome().value() {
            terminal
        } else if child_count == 0 {
            let raw = playout.playout(&board, bias.playout_mid(), rng);
            if bias.is_off() {
                expand_after = true;
                raw
            } else {
                if visits + 1 >= EXPAND_THRESHOLD {
                    self.expand(id);
                }
                damp(raw, 0.5)
            }
        } else {
            assert_eq!(
                child_count,
                board.legal_mask().count_ones() as usize,
                "node {} has {} children for {} legal moves",
                id.0,
                child_count,
                board.legal_mask().count_ones()
            );
            let child = self.select_child(id, bias, exploration);
            let flipped = 1.0 - self.evaluate(child, bias.flipped(), exploration, playout, rng);
            if bias.is_off() {
                flipped
            } else {
                damp(flipped, 0.5)
            }
        };

        self.record(id, value, bias);

        if expand_after && self.get(id).visits == EXPAND_THRESHOLD {
            self.expand(id);
        }
        value
    }

    /// Fold one evaluation into a node's statistics.
    fn record(&mut self, id: NodeId, value: f64, bias: DrawBias) {
        let node = self.get_mut(id);
        node.visits += 1;
        if bias.is_off() {
            node.score += value;
            return;
        }

        let parent_view = 1.0 - value;
        node.score += parent_view;
        node.p_score += match bias {
            DrawBias::Opponent => fold_draw(parent_view),
            _ => parent_view,
        };
    }

    /// Most visited root child as (column, visits). Ties go to the earliest
    /// child.
    ///
    /// # Panics
    ///
    /// If the root has not been expanded.
    pub fn best_action(&self) -> (u8, u32) {
        let root = self.get(self.root);
        assert!(root.is_expanded(), "root has no children to choose from");

        let (first_col, first_id) = root.children[0];
        let mut best = (first_col, self.get(first_id).visits);
        for &(col, id) in &root.children[1..] {
            let visits = self.get(id).visits;
            if visits > best.1 {
                best = (col, visits);
            }
        }
        best
    }

    /// Visits per column at the root, 0 for columns without a child.
    pub fn visit_counts(&self) -> [u32; COLS] {
        let mut counts = [0; COLS];
        for &(col, id) in &self.get(self.root).children {
            counts[col as usize] = self.get(id).visits;
        }
        counts
    }

    /// Per-child statistics at the root, oriented to the root's mover.
    pub fn root_summary(&self, bias: DrawBias) -> Vec<ChildSummary> {
        self.get(self.root)
            .children
            .iter()
            .map(|&(column, id)| {
                let child = self.get(id);
                let mean_score = if bias.is_off() {
                    1.0 - child.mean_score()
                } else {
                    child.mean_score()
                };
                ChildSummary {
                    column,
                    visits: child.visits,
                    mean_score: if child.visits == 0 { 0.0 } else { mean_score },
                    p_value: (!bias.is_off()).then(|| child.p_value()),
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.get(self.root).visits,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        self.get(node_id)
            .children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Fold values above one half back below it, then rescale to [0, 1].
#[inline]
fn fold_draw(value: f64) -> f64 {
    let folded = if value > 0.5 { 1.0 - value } else { value };
    folded * 2.0
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

/// One root child as seen by the player to move at the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildSummary {
    pub column: u8,
    pub visits: u32,
    /// Mean value of playing `column`, 0.0 while unvisited
    pub mean_score: f64,
    /// Draw-biased diagnostic, `None` for plain search
    pub p_value: Option<f64>,
}

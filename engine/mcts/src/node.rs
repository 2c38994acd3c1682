//! MCTS tree node representation.
//!
//! Each node owns its own copy of the position it stands for, together with
//! the visit statistics used by UCB1 selection.

use games_connect4::BitBoard;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Position at this node, owned by the node
    pub board: BitBoard,

    /// Number of evaluations that passed through this node
    pub visits: u32,

    /// Sum of values accumulated at this node.
    /// Plain search stores them from this node's mover's perspective,
    /// draw-biased search from the parent mover's perspective.
    pub score: f64,

    /// Sum of the draw-biased diagnostic statistic. Never read by selection.
    pub p_score: f64,

    /// Children: (column, NodeId) pairs in legal-move order.
    /// Empty until the node is expanded.
    pub children: Vec<(u8, NodeId)>,
}

impl MctsNode {
    pub fn new(board: BitBoard) -> Self {
        Self {
            board,
            visits: 0,
            score: 0.0,
            p_score: 0.0,
            children: Vec::new(),
        }
    }

    /// Sample mean of the accumulated score.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }

    /// Sample mean of the diagnostic statistic.
    #[inline]
    pub fn p_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.p_score / self.visits as f64
        }
    }

    /// UCB1 score of this node as a child of a parent whose children have
    /// `ln_total` = ln(sum of sibling visits).
    ///
    /// `exploitation` is the mean already oriented to the parent. The node
    /// must have been visited at least once.
    #[inline]
    pub fn ucb1(&self, exploitation: f64, ln_total: f64, exploration: f64) -> f64 {
        exploitation + exploration * (2.0 * ln_total / self.visits as f64).sqrt()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.board.is_done()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node still gets its value from playouts.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal() || !self.is_expanded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = MctsNode::new(BitBoard::new());
        assert_eq!(node.visits, 0);
        assert!(node.children.is_empty());
        assert!(node.is_leaf());
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_means() {
        let mut node = MctsNode::new(BitBoard::new());

        // Unvisited
        assert!(node.mean_score().abs() < 1e-12);
        assert!(node.p_value().abs() < 1e-12);

        node.visits = 4;
        node.score = 3.0;
        node.p_score = 1.0;
        assert!((node.mean_score() - 0.75).abs() < 1e-12);
        assert!((node.p_value() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1() {
        let mut node = MctsNode::new(BitBoard::new());
        node.visits = 10;
        node.score = 4.0;

        // 0.6 + 1.0 * sqrt(2 * ln(100) / 10)
        let ln_total = 100f64.ln();
        let expected = 0.6 + (2.0 * ln_total / 10.0).sqrt();
        let ucb = node.ucb1(1.0 - node.mean_score(), ln_total, 1.0);
        assert!((ucb - expected).abs() < 1e-12);

        // Exploration term scales linearly
        let wide = node.ucb1(0.6, ln_total, 3.0);
        assert!((wide - (0.6 + 3.0 * (2.0 * ln_total / 10.0).sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_node_is_leaf() {
        let mut board = BitBoard::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            board.play(col);
        }
        let mut node = MctsNode::new(board);
        assert!(node.is_terminal());

        node.children.push((0, NodeId(1)));
        assert!(node.is_leaf());
    }
}

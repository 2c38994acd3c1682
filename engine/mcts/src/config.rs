//! MCTS configuration parameters.

use std::time::Duration;

/// Visit count at which a leaf grows one child per legal move.
pub const EXPAND_THRESHOLD: u32 = 10;

/// UCB1 exploration constant for plain search.
pub const DEFAULT_EXPLORATION: f64 = 1.0;

/// UCB1 exploration constant for draw-biased search.
pub const DRAW_EXPLORATION: f64 = 3.0;

/// Default wall-clock budget per move.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(100);

/// How long a search runs. The two forms are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Keep starting root iterations until this much time has passed.
    /// A running iteration is never interrupted.
    Deadline(Duration),

    /// Run exactly this many root iterations.
    Iterations(u32),
}

/// Draw-bias sign of one tree level.
///
/// The sign alternates with depth: the root is searched as [`DrawBias::Own`],
/// its children as [`DrawBias::Opponent`], and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawBias {
    /// Plain search, no damping.
    Off,
    /// Levels where the searching side is to move.
    Own,
    /// Levels where the opponent of the searching side is to move.
    Opponent,
}

impl DrawBias {
    /// Sign of the next level down.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            DrawBias::Off => DrawBias::Off,
            DrawBias::Own => DrawBias::Opponent,
            DrawBias::Opponent => DrawBias::Own,
        }
    }

    #[inline]
    pub fn is_off(self) -> bool {
        self == DrawBias::Off
    }

    /// Damping midpoint handed to the playout at a leaf of this level.
    ///
    /// Own levels damp symmetrically around 0.5. Opponent levels use 1.0,
    /// which pulls every result below the midpoint.
    #[inline]
    pub fn playout_mid(self) -> Option<f64> {
        match self {
            DrawBias::Off => None,
            DrawBias::Own => Some(0.5),
            DrawBias::Opponent => Some(1.0),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant in the UCB1 bonus term.
    /// Higher values spread visits more evenly across siblings.
    pub exploration: f64,

    /// Search with damped values and an alternating draw-bias sign.
    pub draw_bias: bool,

    /// When to stop iterating.
    pub budget: Budget,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::plain()
    }
}

impl MctsConfig {
    /// Plain UCB1 search with the default time budget.
    pub fn plain() -> Self {
        Self {
            exploration: DEFAULT_EXPLORATION,
            draw_bias: false,
            budget: Budget::Deadline(DEFAULT_TIME_BUDGET),
        }
    }

    /// Draw-biased search: wider exploration and damped values.
    pub fn draw_biased() -> Self {
        Self {
            exploration: DRAW_EXPLORATION,
            draw_bias: true,
            budget: Budget::Deadline(DEFAULT_TIME_BUDGET),
        }
    }

    /// Builder pattern: set the budget.
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builder pattern: stop after `budget` of wall-clock time.
    pub fn with_time_budget(self, budget: Duration) -> Self {
        self.with_budget(Budget::Deadline(budget))
    }

    /// Builder pattern: stop after exactly `iterations` root iterations.
    pub fn with_iterations(self, iterations: u32) -> Self {
        self.with_budget(Budget::Iterations(iterations))
    }

    /// Draw-bias sign used at the root.
    pub fn root_bias(&self) -> DrawBias {
        if self.draw_bias {
            DrawBias::Own
        } else {
            DrawBias::Off
        }
    }
}

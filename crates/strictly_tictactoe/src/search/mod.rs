//! Adversarial search over the tic-tac-toe game tree.
//!
//! The engine is plain minimax with alpha-beta pruning. It walks the tree
//! through the board model only: side to move, terminality, utility and
//! successor boards. The whole tree is at most nine plies deep, so there is no
//! transposition table, iterative deepening or heuristic evaluation; every
//! value returned is exact.
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Action, Board, Searcher};
//!
//! let board: Board = "XX./OO./...".parse().unwrap();
//! let mut searcher = Searcher::default();
//! let result = searcher.search(&board).unwrap();
//! assert_eq!(result.action, Some(Action::new(0, 2)));
//! assert_eq!(result.value, 1);
//! ```

mod alphabeta;
mod exhaustive;
mod parallel;
mod playout;

pub use alphabeta::Searcher;
pub use exhaustive::{minimax_value, optimal_actions, reachable_boards};
pub use playout::{Playout, Ply, play_out};

use crate::action::Action;
use serde::{Deserialize, Serialize};

/// Lower sentinel bound, strictly below every utility.
pub(crate) const NEG_INFINITY: i8 = -2;
/// Upper sentinel bound, strictly above every utility.
pub(crate) const POS_INFINITY: i8 = 2;

/// Value and best move of a searched board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Game-theoretic value for X: `1` X wins, `-1` O wins, `0` draw.
    pub value: i8,
    /// Best move found; `None` when the searched board is terminal.
    pub action: Option<Action>,
}

impl SearchResult {
    pub(crate) fn terminal(value: i8) -> Self {
        Self {
            value,
            action: None,
        }
    }
}

/// Node and cutoff counters for one root search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards visited, root included.
    pub nodes: u64,
    /// Times the remaining siblings were skipped because `alpha >= beta`.
    pub cutoffs: u64,
    /// Deepest ply reached below the root.
    pub max_ply: u8,
}

impl SearchStats {
    /// Folds another counter set into this one (for combining workers).
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.max_ply = self.max_ply.max(other.max_ply);
    }
}

/// Tuning knobs for [`Searcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Evaluate root moves on separate threads, each with its own bounds.
    ///
    /// Values are identical to the sequential search; only pruning across
    /// root siblings is lost.
    pub parallel_root: bool,
}

impl SearchConfig {
    /// Returns a copy with `parallel_root` set.
    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }
}

//! Error types for board transitions and search.

use crate::action::Action;
use derive_more::{Display, Error};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum IllegalMoveReason {
    /// The target cell already holds a mark.
    #[strum(to_string = "cell already taken")]
    Occupied,
    /// The coordinate does not address a cell on the board.
    #[strum(to_string = "coordinate out of range")]
    OutOfRange,
}

/// Errors raised by the board model and the search engine.
///
/// Every operation is a pure function of its inputs, so all of these are
/// caller contract violations; none is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Attempted transition into an occupied or out-of-range cell.
    #[display("Illegal move at {action}: {reason}")]
    IllegalMove {
        /// The rejected action.
        action: Action,
        /// Why it was rejected.
        reason: IllegalMoveReason,
    },

    /// An operation was called on a board in the wrong terminality state.
    #[display("Precondition violated in {operation}: {message}")]
    PreconditionViolation {
        /// Name of the operation whose precondition failed.
        operation: &'static str,
        /// What was wrong.
        message: String,
    },

    /// A board with impossible mark counts reached the model.
    #[display("Invariant violation: X={x_count}, O={o_count} (X must equal O or lead by one)")]
    InvariantViolation {
        /// Number of X marks.
        x_count: usize,
        /// Number of O marks.
        o_count: usize,
    },

    /// Mark counts are valid but the lines on the board could not arise in a game.
    #[display("Unreachable position {board}: {message}")]
    UnreachablePosition {
        /// The rejected board in compact notation.
        board: String,
        /// Which lines conflict.
        message: String,
    },

    /// Text could not be parsed as a board or action.
    #[display("Failed to parse '{input}': {message}")]
    Parse {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        message: String,
    },
}

impl GameError {
    /// Returns true for [`GameError::IllegalMove`].
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::IllegalMove { .. })
    }

    /// Returns true for [`GameError::PreconditionViolation`].
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, GameError::PreconditionViolation { .. })
    }

    /// Returns true for [`GameError::InvariantViolation`].
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GameError::InvariantViolation { .. })
    }

    /// Returns true for [`GameError::UnreachablePosition`].
    pub fn is_unreachable_position(&self) -> bool {
        matches!(self, GameError::UnreachablePosition { .. })
    }

    pub(crate) fn precondition(operation: &'static str, message: impl Into<String>) -> Self {
        GameError::PreconditionViolation {
            operation,
            message: message.into(),
        }
    }
}

/// Convenience alias for results carrying a [`GameError`].
pub type GameResult<T> = Result<T, GameError>;

//! Strictly Tic-Tac-Toe - pure board model and exact solver
//!
//! This crate computes the game-theoretically optimal move on a 3x3
//! tic-tac-toe board.
//!
//! # Architecture
//!
//! - **Board model**: immutable [`Board`] values with pure queries
//!   (side to move, legal actions, winner, terminal test, utility) and
//!   transitions that always produce a new board.
//! - **Rules**: win and draw detection over the eight [`Line`]s, kept apart
//!   from board storage.
//! - **Search**: minimax with alpha-beta pruning ([`Searcher`]), plus an
//!   unpruned reference ([`minimax_value`]) and optimal self-play
//!   ([`play_out`]).
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Board, Outcome, Searcher, play_out};
//!
//! let mut searcher = Searcher::default();
//! let playout = play_out(&Board::new(), &mut searcher).unwrap();
//! assert_eq!(playout.outcome, Outcome::Draw);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod outcome;
pub mod rules;
pub mod search;
mod types;

pub use action::{Action, SIZE};
pub use board::Board;
pub use error::{GameError, GameResult, IllegalMoveReason};
pub use outcome::Outcome;
pub use rules::Line;
pub use search::{
    Playout, Ply, SearchConfig, SearchResult, SearchStats, Searcher, minimax_value,
    optimal_actions, play_out, reachable_boards,
};
pub use types::{Player, Square};

/// Returns the optimal move for the side to move using a default [`Searcher`].
///
/// # Errors
///
/// Returns [`GameError::PreconditionViolation`] if the board is terminal.
pub fn best_action(board: &Board) -> GameResult<Action> {
    Searcher::default().best_action(board)
}

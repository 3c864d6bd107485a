//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search engine can consult them without touching cells.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, check_winner, winning_line};

use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::outcome::Outcome;
use tracing::instrument;

/// Returns true if the game is over: a line is complete or the grid is full.
#[instrument(level = "trace", skip(board))]
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}

/// Outcome of a terminal board, `None` while the game is still open.
#[instrument(level = "trace", skip(board))]
pub fn outcome(board: &Board) -> Option<Outcome> {
    match check_winner(board) {
        Some(player) => Some(Outcome::Winner(player)),
        None if is_full(board) => Some(Outcome::Draw),
        None => None,
    }
}

/// Scalar value of a terminal board: `+1` X won, `-1` O won, `0` draw.
///
/// # Errors
///
/// Returns [`GameError::PreconditionViolation`] if the board is not terminal.
#[instrument(level = "trace", skip(board))]
pub fn utility(board: &Board) -> GameResult<i8> {
    outcome(board)
        .map(|outcome| outcome.utility())
        .ok_or_else(|| GameError::precondition("utility", format!("board {} is not terminal", board)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_open_board_is_not_terminal() {
        let board: Board = "XX./OO./...".parse().unwrap();
        assert!(!is_terminal(&board));
        assert_eq!(outcome(&board), None);
    }

    #[test]
    fn test_utility_of_wins() {
        let x_wins: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(utility(&x_wins), Ok(1));
        assert_eq!(outcome(&x_wins), Some(Outcome::Winner(Player::X)));

        let o_wins: Board = "XX./OOO/X..".parse().unwrap();
        assert_eq!(utility(&o_wins), Ok(-1));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert!(is_terminal(&board));
        assert_eq!(utility(&board), Ok(0));
        assert_eq!(outcome(&board), Some(Outcome::Draw));
    }

    #[test]
    fn test_utility_rejects_open_board() {
        let err = utility(&Board::new()).unwrap_err();
        assert!(err.is_precondition_violation());
    }
}

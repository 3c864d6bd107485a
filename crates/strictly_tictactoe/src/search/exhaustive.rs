//! Unpruned minimax and game-tree enumeration.
//!
//! These walk every successor of every node. They are the reference the
//! pruned search is checked against, and they answer "which moves are
//! optimal" questions where the alpha-beta tie-break would hide alternatives.

use crate::action::Action;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::types::Player;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, instrument};

/// Exact game value of `board` for X, without pruning.
///
/// Transpositions are memoized; every legal successor of every reachable
/// node is still evaluated.
///
/// # Errors
///
/// Returns [`GameError::InvariantViolation`] if the board is corrupt.
#[instrument(skip(board), fields(board = %board))]
pub fn minimax_value(board: &Board) -> GameResult<i8> {
    let mut memo = HashMap::new();
    let value = solve(board, &mut memo)?;
    debug!(value, positions = memo.len(), "Exhaustive minimax complete");
    Ok(value)
}

fn solve(board: &Board, memo: &mut HashMap<Board, i8>) -> GameResult<i8> {
    if let Some(&value) = memo.get(board) {
        return Ok(value);
    }

    let value = match board.outcome() {
        Some(outcome) => outcome.utility(),
        None => {
            let player = board.side_to_move()?;
            let mut best: Option<i8> = None;
            for action in board.legal_actions() {
                let value = solve(&board.apply(action)?, memo)?;
                best = Some(match (player, best) {
                    (_, None) => value,
                    (Player::X, Some(current)) => current.max(value),
                    (Player::O, Some(current)) => current.min(value),
                });
            }
            best.ok_or_else(|| {
                GameError::precondition(
                    "minimax_value",
                    format!("non-terminal board {} has no legal action", board),
                )
            })?
        }
    };

    memo.insert(*board, value);
    Ok(value)
}

/// Every move whose exact value equals the optimum for the side to move.
///
/// Returned in row-major order.
///
/// # Errors
///
/// - [`GameError::PreconditionViolation`] if the board is terminal.
/// - [`GameError::InvariantViolation`] if the board is corrupt.
#[instrument(skip(board), fields(board = %board))]
pub fn optimal_actions(board: &Board) -> GameResult<Vec<Action>> {
    if board.is_terminal() {
        return Err(GameError::precondition(
            "optimal_actions",
            format!("board {} is terminal", board),
        ));
    }

    let player = board.side_to_move()?;
    let mut memo = HashMap::new();
    let mut scored = Vec::new();
    for action in board.legal_actions() {
        scored.push((action, solve(&board.apply(action)?, &mut memo)?));
    }

    let best = match player {
        Player::X => scored.iter().map(|&(_, v)| v).max(),
        Player::O => scored.iter().map(|&(_, v)| v).min(),
    };

    Ok(scored
        .into_iter()
        .filter(|&(_, v)| Some(v) == best)
        .map(|(action, _)| action)
        .collect())
}

/// All distinct boards reachable from `start` by legal play, `start` first.
///
/// Breadth-first; play stops at terminal boards.
///
/// # Errors
///
/// Returns [`GameError::InvariantViolation`] if `start` is corrupt.
#[instrument(skip(start), fields(start = %start))]
pub fn reachable_boards(start: &Board) -> GameResult<Vec<Board>> {
    let mut seen = HashSet::from([*start]);
    let mut order = vec![*start];
    let mut queue = VecDeque::from([*start]);

    while let Some(board) = queue.pop_front() {
        if board.is_terminal() {
            continue;
        }
        for action in board.legal_actions() {
            let next = board.apply(action)?;
            if seen.insert(next) {
                order.push(next);
                queue.push_back(next);
            }
        }
    }

    debug!(count = order.len(), "Enumerated reachable boards");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_value_is_draw() {
        assert_eq!(minimax_value(&Board::new()), Ok(0));
    }

    #[test]
    fn test_terminal_board_value_is_utility() {
        let board: Board = "XX./OOO/X..".parse().unwrap();
        assert_eq!(minimax_value(&board), Ok(-1));
    }

    #[test]
    fn test_reachable_board_count() {
        // 5,478 distinct legal positions, the empty board included.
        let boards = reachable_boards(&Board::new()).unwrap();
        assert_eq!(boards.len(), 5478);
        assert_eq!(boards[0], Board::new());
    }

    #[test]
    fn test_every_reachable_board_is_valid_and_valued() {
        for board in reachable_boards(&Board::new()).unwrap() {
            assert_eq!(Board::from_squares(*board.squares()), Ok(board), "{}", board);
            let value = minimax_value(&board).unwrap();
            assert!((-1..=1).contains(&value), "{}", board);
        }
    }

    #[test]
    fn test_optimal_replies_to_corner_opening() {
        // Against a corner opening only the centre holds the draw for O.
        let board: Board = "X../.../...".parse().unwrap();
        assert_eq!(optimal_actions(&board), Ok(vec![Action::new(1, 1)]));
    }

    #[test]
    fn test_every_opening_move_draws() {
        let board = Board::new();
        assert_eq!(optimal_actions(&board).unwrap().len(), 9);
    }

    #[test]
    fn test_optimal_actions_rejects_terminal() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        assert!(optimal_actions(&board).unwrap_err().is_precondition_violation());
    }
}

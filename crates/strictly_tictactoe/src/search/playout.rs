//! Optimal self-play from a given board to the end of the game.

use super::Searcher;
use crate::action::Action;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::outcome::Outcome;
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One move of a playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ply {
    /// Who moved.
    pub player: Player,
    /// Where.
    pub action: Action,
}

/// Record of a game played out by the engine for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playout {
    /// Board the playout started from.
    pub start: Board,
    /// Moves in the order they were played.
    pub plies: Vec<Ply>,
    /// Terminal board reached.
    pub finish: Board,
    /// Result of the game.
    pub outcome: Outcome,
}

/// Lets `searcher` choose every move from `start` until the game ends.
///
/// A terminal `start` yields an empty playout.
///
/// # Errors
///
/// Returns [`GameError::InvariantViolation`] if `start` is corrupt.
#[instrument(skip(start, searcher), fields(start = %start))]
pub fn play_out(start: &Board, searcher: &mut Searcher) -> GameResult<Playout> {
    let mut board = *start;
    let mut plies = Vec::new();

    while !board.is_terminal() {
        let player = board.side_to_move()?;
        let action = searcher.best_action(&board)?;
        board = board.apply(action)?;
        plies.push(Ply { player, action });
    }

    let outcome = board.outcome().ok_or_else(|| {
        GameError::precondition("play_out", format!("board {} ended without an outcome", board))
    })?;
    info!(%outcome, plies = plies.len(), "Playout finished");

    Ok(Playout {
        start: *start,
        plies,
        finish: board,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_from_empty_board_draws() {
        let mut searcher = Searcher::default();
        let playout = play_out(&Board::new(), &mut searcher).unwrap();
        assert_eq!(playout.outcome, Outcome::Draw);
        assert_eq!(playout.plies.len(), 9);
        assert_eq!(playout.plies[0].player, Player::X);
        assert!(playout.finish.is_full());
    }

    #[test]
    fn test_playout_converts_forced_win() {
        let start: Board = "XX./OO./...".parse().unwrap();
        let playout = play_out(&start, &mut Searcher::default()).unwrap();
        assert_eq!(playout.outcome, Outcome::Winner(Player::X));
        assert_eq!(
            playout.plies,
            vec![Ply {
                player: Player::X,
                action: Action::new(0, 2)
            }]
        );
    }

    #[test]
    fn test_playout_from_terminal_is_empty() {
        let start: Board = "XXX/OO./...".parse().unwrap();
        let playout = play_out(&start, &mut Searcher::default()).unwrap();
        assert!(playout.plies.is_empty());
        assert_eq!(playout.finish, start);
    }
}

//! Win detection logic for tic-tac-toe.

use crate::action::Action;
use crate::board::Board;
use crate::types::{Player, Square};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the eight lines that win the game when filled by a single mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Line {
    /// Row 0.
    TopRow,
    /// Row 1.
    MiddleRow,
    /// Row 2.
    BottomRow,
    /// Column 0.
    LeftColumn,
    /// Column 1.
    CenterColumn,
    /// Column 2.
    RightColumn,
    /// (0,0) to (2,2).
    MainDiagonal,
    /// (0,2) to (2,0).
    AntiDiagonal,
}

impl Line {
    /// The three cells making up this line.
    pub fn cells(self) -> [Action; 3] {
        match self {
            Line::TopRow => [Action::new(0, 0), Action::new(0, 1), Action::new(0, 2)],
            Line::MiddleRow => [Action::new(1, 0), Action::new(1, 1), Action::new(1, 2)],
            Line::BottomRow => [Action::new(2, 0), Action::new(2, 1), Action::new(2, 2)],
            Line::LeftColumn => [Action::new(0, 0), Action::new(1, 0), Action::new(2, 0)],
            Line::CenterColumn => [Action::new(0, 1), Action::new(1, 1), Action::new(2, 1)],
            Line::RightColumn => [Action::new(0, 2), Action::new(1, 2), Action::new(2, 2)],
            Line::MainDiagonal => [Action::new(0, 0), Action::new(1, 1), Action::new(2, 2)],
            Line::AntiDiagonal => [Action::new(0, 2), Action::new(1, 1), Action::new(2, 0)],
        }
    }

    /// Returns the player owning all three cells, if any.
    ///
    /// Each line is judged on its own cells only.
    pub fn owner(self, board: &Board) -> Option<Player> {
        let [a, b, c] = self.cells().map(|cell| board.get(cell));
        match (a, b, c) {
            (Some(Square::Occupied(p1)), Some(Square::Occupied(p2)), Some(Square::Occupied(p3)))
                if p1 == p2 && p2 == p3 =>
            {
                Some(p1)
            }
            _ => None,
        }
    }
}

/// Returns the first complete line on the board, scanning all eight.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn winning_line(board: &Board) -> Option<Line> {
    Line::iter().find(|line| line.owner(board).is_some())
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    Line::iter().find_map(|line| line.owner(board))
}

//! Immutable 3x3 board value and its transitions.

use crate::action::{Action, SIZE};
use crate::error::{GameError, GameResult, IllegalMoveReason};
use crate::outcome::Outcome;
use crate::rules::{self, Line};
use crate::types::{Player, Square};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// 3x3 tic-tac-toe board.
///
/// Boards are plain `Copy` values. Nothing mutates a board in place:
/// [`Board::apply`] returns a fresh board and leaves the original untouched.
/// Every board obtainable through the public API satisfies the count
/// invariant (X equals O or leads by one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from row-major squares.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvariantViolation`] if the mark counts could not arise
    ///   from alternating play with X first.
    /// - [`GameError::UnreachablePosition`] if both players own a line, or the
    ///   owner of a line was not the last to move.
    #[instrument(skip(squares))]
    pub fn from_squares(squares: [Square; 9]) -> GameResult<Self> {
        let board = Self { squares };
        let to_move = board.side_to_move()?;

        let owns_line =
            |player: Player| Line::iter().any(|line| line.owner(&board) == Some(player));
        let unreachable = |message: String| GameError::UnreachablePosition {
            board: board.to_string(),
            message,
        };

        let owners: Vec<Player> = [Player::X, Player::O]
            .into_iter()
            .filter(|&player| owns_line(player))
            .collect();
        match owners.as_slice() {
            [_, _] => Err(unreachable("both players own a line".to_string())),
            // The owner of a line must have made the last move.
            [owner] if *owner == to_move => Err(unreachable(format!(
                "{} owns a line but {} has moved since",
                owner,
                owner.opponent()
            ))),
            _ => Ok(board),
        }
    }

    /// Gets the square at the given cell, `None` if out of range.
    pub fn get(&self, action: Action) -> Option<Square> {
        action.index().map(|i| self.squares[i])
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the squares grouped by row.
    pub fn rows(&self) -> [[Square; SIZE]; SIZE] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.squares[row * SIZE + col]))
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(player))
            .count()
    }

    /// Number of marks on the board.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    /// Returns the player whose turn it is.
    ///
    /// Derived purely from mark counts: X when the counts are equal, O when X
    /// leads by one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvariantViolation`] for any other count pair.
    pub fn side_to_move(&self) -> GameResult<Player> {
        let x_count = self.count(Player::X);
        let o_count = self.count(Player::O);
        if x_count == o_count {
            Ok(Player::X)
        } else if x_count == o_count + 1 {
            Ok(Player::O)
        } else {
            Err(GameError::InvariantViolation { x_count, o_count })
        }
    }

    /// Returns every empty cell in row-major order.
    ///
    /// Empty exactly when the board is full.
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|&action| self.get(action) == Some(Square::Empty))
            .collect()
    }

    /// Returns the board that results from the side to move marking `action`.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalMove`] if the cell is out of range or occupied.
    /// - [`GameError::InvariantViolation`] if the board itself is corrupt.
    #[instrument(level = "trace", skip(self), fields(board = %self))]
    pub fn apply(&self, action: Action) -> GameResult<Board> {
        let index = action.index().ok_or(GameError::IllegalMove {
            action,
            reason: IllegalMoveReason::OutOfRange,
        })?;

        if !self.squares[index].is_empty() {
            return Err(GameError::IllegalMove {
                action,
                reason: IllegalMoveReason::Occupied,
            });
        }

        let player = self.side_to_move()?;
        let mut squares = self.squares;
        squares[index] = Square::Occupied(player);
        Ok(Board { squares })
    }

    /// Returns the player owning a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Returns the first complete line, if any.
    pub fn winning_line(&self) -> Option<Line> {
        rules::winning_line(self)
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Checks if the game is over on this board.
    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(self)
    }

    /// Outcome of the game, `None` while still open.
    pub fn outcome(&self) -> Option<Outcome> {
        rules::outcome(self)
    }

    /// Value of a terminal board from X's point of view.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PreconditionViolation`] on a non-terminal board.
    pub fn utility(&self) -> GameResult<i8> {
        rules::utility(self)
    }

    /// Copy of this board with one square replaced, bypassing every check.
    #[cfg(test)]
    pub(crate) fn with_square(&self, action: Action, square: Square) -> Board {
        let mut squares = self.squares;
        if let Some(index) = action.index() {
            squares[index] = square;
        }
        Board { squares }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Compact notation: three `/`-separated rows of `X`, `O` and `.`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for square in row {
                write!(f, "{}", square.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses the compact notation, e.g. `XX./OO./...`.
    ///
    /// Rows may also be separated by newlines or `|`. Any nine-symbol string
    /// without separators is read row-major.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: String| GameError::Parse {
            input: s.to_string(),
            message,
        };

        let trimmed = s.trim_matches(|c: char| c == '\n' || c == '\r');
        let rows: Vec<&str> = trimmed
            .split(|c: char| c == '/' || c == '\n' || c == '|')
            .map(|row| row.trim_end_matches('\r'))
            .collect();

        let symbols: Vec<char> = match rows.as_slice() {
            [single] => single.chars().collect(),
            rows if rows.len() == SIZE => {
                for (i, row) in rows.iter().enumerate() {
                    let width = row.chars().count();
                    if width != SIZE {
                        return Err(parse_error(format!(
                            "row {} has {} cells, expected {}",
                            i, width, SIZE
                        )));
                    }
                }
                rows.iter().flat_map(|row| row.chars()).collect()
            }
            rows => {
                return Err(parse_error(format!(
                    "found {} rows, expected {}",
                    rows.len(),
                    SIZE
                )));
            }
        };

        if symbols.len() != SIZE * SIZE {
            return Err(parse_error(format!(
                "found {} cells, expected {}",
                symbols.len(),
                SIZE * SIZE
            )));
        }

        let mut squares = [Square::Empty; 9];
        for (i, c) in symbols.into_iter().enumerate() {
            squares[i] = Square::from_symbol(c)
                .ok_or_else(|| parse_error(format!("invalid character '{}' at cell {}", c, i)))?;
        }

        Board::from_squares(squares)
    }
}

impl TryFrom<String> for Board {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board_is_empty_and_x_moves() {
        let board = Board::new();
        assert_eq!(board.occupied(), 0);
        assert_eq!(board.side_to_move(), Ok(Player::X));
        assert_eq!(board.legal_actions(), Action::ALL.to_vec());
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_side_to_move_alternates() {
        let mut board = Board::new();
        let mut expected = Player::X;
        for action in [
            Action::new(1, 1),
            Action::new(0, 0),
            Action::new(2, 2),
            Action::new(0, 2),
            Action::new(0, 1),
        ] {
            assert_eq!(board.side_to_move(), Ok(expected));
            board = board.apply(action).unwrap();
            assert_eq!(board.get(action), Some(Square::Occupied(expected)));
            expected = expected.opponent();
        }
    }

    #[test]
    fn test_side_to_move_rejects_corrupt_counts() {
        let o_ahead = Board::new().with_square(Action::new(0, 0), Square::Occupied(Player::O));
        assert!(o_ahead.side_to_move().unwrap_err().is_invariant_violation());

        let x_two_ahead = Board::new()
            .with_square(Action::new(0, 0), Square::Occupied(Player::X))
            .with_square(Action::new(0, 1), Square::Occupied(Player::X));
        assert_eq!(
            x_two_ahead.side_to_move(),
            Err(GameError::InvariantViolation {
                x_count: 2,
                o_count: 0
            })
        );
    }

    #[test]
    fn test_apply_does_not_mutate_original() {
        let board: Board = "X../.O./...".parse().unwrap();
        let before = board;
        let first = board.apply(Action::new(2, 2)).unwrap();
        let second = board.apply(Action::new(2, 2)).unwrap();
        assert_eq!(first, second);
        assert_eq!(board, before);
        assert_eq!(board.get(Action::new(2, 2)), Some(Square::Empty));
    }

    #[test]
    fn test_apply_rejects_occupied_cell() {
        let board = Board::new().apply(Action::new(1, 1)).unwrap();
        assert_eq!(
            board.apply(Action::new(1, 1)),
            Err(GameError::IllegalMove {
                action: Action::new(1, 1),
                reason: IllegalMoveReason::Occupied,
            })
        );
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let err = Board::new().apply(Action::new(3, 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                action: Action::new(3, 1),
                reason: IllegalMoveReason::OutOfRange,
            }
        );
    }

    #[test]
    fn test_extreme_coordinates_are_out_of_range() {
        let board: Board = "X../.O./...".parse().unwrap();
        for action in [
            Action::new(usize::MAX, 0),
            Action::new(0, usize::MAX),
            Action::new(usize::MAX, usize::MAX),
        ] {
            assert_eq!(board.get(action), None);
            assert_eq!(
                board.apply(action),
                Err(GameError::IllegalMove {
                    action,
                    reason: IllegalMoveReason::OutOfRange,
                })
            );
        }
    }

    #[test]
    fn test_from_squares_rejects_unreachable_lines() {
        // X X X / O O O / X . . : both players own a row.
        let both = "XXX/OOO/X..".parse::<Board>().unwrap_err();
        assert!(both.is_unreachable_position());
        assert!(both.to_string().contains("both players own a line"));

        // O completed the diagonal, yet X moved afterwards.
        let late = "OXX/XOX/..O".parse::<Board>().unwrap_err();
        assert!(late.is_unreachable_position());
        assert!(late.to_string().contains("O owns a line but X has moved since"));

        // X completed the top row, yet O moved afterwards.
        let x_late = "XXX/OO./O..".parse::<Board>().unwrap_err();
        assert!(x_late.is_unreachable_position());
    }

    #[test]
    fn test_from_squares_accepts_last_mover_lines() {
        assert!("XXX/OO./...".parse::<Board>().is_ok());
        assert!("XX./OOO/X..".parse::<Board>().is_ok());
        // Double line completed by a single final move.
        assert!("XXX/XOO/XOO".parse::<Board>().is_ok());
    }

    #[test]
    fn test_legal_actions_shrink_and_are_idempotent() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        let first = board.legal_actions();
        let second = board.legal_actions();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert!(!first.contains(&Action::new(0, 0)));
    }

    #[test]
    fn test_full_board_has_no_actions() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert!(board.legal_actions().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.utility(), Ok(0));
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        let board: Board = "XX./OO./...".parse().unwrap();
        assert_eq!(board.to_string(), "XX./OO./...");
        assert_eq!(board.to_string().parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_alternate_layouts() {
        let slash: Board = "X../.O./...".parse().unwrap();
        let flat: Board = "X...O....".parse().unwrap();
        let lines: Board = "x..\n.o.\n...\n".parse().unwrap();
        let spaced: Board = "X   O    ".parse().unwrap();
        assert_eq!(slash, flat);
        assert_eq!(slash, lines);
        assert_eq!(slash, spaced);
    }

    #[test]
    fn test_trailing_spaces_are_empty_cells() {
        let board: Board = "XO       ".parse().unwrap();
        assert_eq!(board.to_string(), "XO./.../...");
        assert_eq!(board.side_to_move(), Ok(Player::X));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("XX/OO./...".parse::<Board>(), Err(GameError::Parse { .. })));
        assert!(matches!("XQ./.../...".parse::<Board>(), Err(GameError::Parse { .. })));
        assert!(matches!("XX./.../...".parse::<Board>(), Err(GameError::InvariantViolation { .. })));
        assert!(matches!("O../.../...".parse::<Board>(), Err(GameError::InvariantViolation { .. })));
    }

    #[test]
    fn test_serde_uses_compact_notation() {
        let board: Board = "X../.O./...".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"X../.O./...\"");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("\"OO./.../...\"").is_err());
    }
}

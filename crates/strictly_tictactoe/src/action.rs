//! Board coordinates for tic-tac-toe moves.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

/// A move target: the `(row, col)` of the cell to mark.
///
/// Coordinates outside `0..3` are representable on purpose so that
/// [`Board::apply`](crate::Board::apply) can reject them as illegal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Action {
    /// All nine in-range cells in row-major order.
    pub const ALL: [Action; 9] = [
        Action::new(0, 0),
        Action::new(0, 1),
        Action::new(0, 2),
        Action::new(1, 0),
        Action::new(1, 1),
        Action::new(1, 2),
        Action::new(2, 0),
        Action::new(2, 1),
        Action::new(2, 2),
    ];

    /// Creates an action. No range check is performed here.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates address a cell on the board.
    pub fn in_range(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Row-major cell index (0-8), or `None` when out of range.
    pub fn index(self) -> Option<usize> {
        self.in_range().then(|| self.row * SIZE + self.col)
    }

    /// Creates an action from a row-major cell index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Action {
    type Err = GameError;

    /// Parses `"r,c"`, `"r c"`, `"(r, c)"` or a single cell index `0-8`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let parse = |part: &str| {
            part.parse::<usize>().map_err(|_| GameError::Parse {
                input: s.to_string(),
                message: format!("'{}' is not a non-negative integer", part),
            })
        };

        match parts.as_slice() {
            [index] => {
                let index = parse(index)?;
                Action::from_index(index).ok_or_else(|| GameError::Parse {
                    input: s.to_string(),
                    message: format!("cell index {} is outside 0-8", index),
                })
            }
            [row, col] => Ok(Action::new(parse(row)?, parse(col)?)),
            _ => Err(GameError::Parse {
                input: s.to_string(),
                message: "expected 'row,col' or a cell index".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), Some(i));
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(9), None);
    }

    #[test]
    fn test_out_of_range_has_no_index() {
        assert!(!Action::new(3, 0).in_range());
        assert_eq!(Action::new(0, 3).index(), None);
    }

    #[test]
    fn test_extreme_coordinates_have_no_index() {
        assert_eq!(Action::new(usize::MAX, 0).index(), None);
        assert_eq!(Action::new(0, usize::MAX).index(), None);
        assert_eq!(Action::new(usize::MAX, usize::MAX).index(), None);
        assert_eq!(Action::new(usize::MAX / 3 + 1, 0).index(), None);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("1,2".parse::<Action>().unwrap(), Action::new(1, 2));
        assert_eq!(" 2 0 ".parse::<Action>().unwrap(), Action::new(2, 0));
        assert_eq!("(0, 1)".parse::<Action>().unwrap(), Action::new(0, 1));
        assert_eq!("4".parse::<Action>().unwrap(), Action::new(1, 1));
        // Out-of-range pairs parse; the board rejects them later.
        assert_eq!("5,5".parse::<Action>().unwrap(), Action::new(5, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Action>().is_err());
        assert!("a,b".parse::<Action>().is_err());
        assert!("9".parse::<Action>().is_err());
        assert!("1,2,3".parse::<Action>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::new(0, 2).to_string(), "(0, 2)");
    }
}

//! Plain-text rendering of boards for the terminal.

use strictly_tictactoe::{Board, SIZE, Square};
use tracing::instrument;

/// Formats the board as a human-readable grid.
///
/// Empty squares show their cell index (0-8) so the player can type it.
#[instrument(skip(board), fields(board = %board))]
pub fn grid(board: &Board) -> String {
    let mut result = String::new();
    for (row, squares) in board.rows().iter().enumerate() {
        for (col, square) in squares.iter().enumerate() {
            let symbol = match square {
                Square::Empty => (row * SIZE + col).to_string(),
                Square::Occupied(player) => player.to_string(),
            };
            result.push_str(&symbol);
            if col + 1 < SIZE {
                result.push('|');
            }
        }
        if row + 1 < SIZE {
            result.push_str("\n-+-+-\n");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_shows_indices() {
        assert_eq!(grid(&Board::new()), "0|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_grid_shows_marks() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(grid(&board), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }
}

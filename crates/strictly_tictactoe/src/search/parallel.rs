//! Root-split parallel search.
//!
//! Each root move is searched on its own scoped thread by a private
//! [`Searcher`] with the full `(-inf, +inf)` window. Nothing is shared between
//! workers while they run; results are merged after every thread has joined.

use super::{NEG_INFINITY, POS_INFINITY, SearchResult, SearchStats, Searcher};
use crate::board::Board;
use crate::error::GameResult;
use crate::types::Player;
use tracing::{debug, instrument};

/// Searches every root move concurrently and merges the results.
///
/// The merge keeps the first move in row-major order whose value is best for
/// `player`, which is also the move the sequential search picks.
#[instrument(skip(board), fields(board = %board))]
pub(super) fn search_root(board: &Board, player: Player) -> GameResult<(SearchResult, SearchStats)> {
    let root = *board;
    let actions = root.legal_actions();

    let children = std::thread::scope(|scope| {
        let handles: Vec<_> = actions
            .iter()
            .map(|&action| {
                let handle = scope.spawn(move || -> GameResult<(i8, SearchStats)> {
                    let child = root.apply(action)?;
                    let mut worker = Searcher::default();
                    let result =
                        worker.evaluate(&child, player.opponent(), NEG_INFINITY, POS_INFINITY, 1)?;
                    Ok((result.value, worker.take_stats()))
                });
                (action, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(action, handle)| match handle.join() {
                Ok(outcome) => (action, outcome),
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect::<Vec<_>>()
    });

    let mut stats = SearchStats {
        nodes: 1,
        ..SearchStats::default()
    };
    let mut best = SearchResult {
        value: match player {
            Player::X => NEG_INFINITY,
            Player::O => POS_INFINITY,
        },
        action: None,
    };

    for (action, outcome) in children {
        let (value, worker_stats) = outcome?;
        stats.merge(&worker_stats);

        let improves = match player {
            Player::X => value > best.value,
            Player::O => value < best.value,
        };
        if improves {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
    }

    debug!(workers = actions.len(), nodes = stats.nodes, "Parallel root merged");
    Ok((best, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = Searcher::default();
        let mut threaded = Searcher::new(SearchConfig::default().with_parallel_root(true));

        for s in [".../.../...", "X../.../...", "XX./OO./...", "X.O/.X./..."] {
            let board: Board = s.parse().unwrap();
            assert_eq!(threaded.search(&board).unwrap(), sequential.search(&board).unwrap(), "{s}");
        }
    }

    #[test]
    fn test_parallel_counts_every_worker() {
        let board = Board::new();
        let (_, stats) = search_root(&board, Player::X).unwrap();
        // Root plus at least one node per root move.
        assert!(stats.nodes >= 10);
        assert_eq!(stats.max_ply, 9);
    }
}

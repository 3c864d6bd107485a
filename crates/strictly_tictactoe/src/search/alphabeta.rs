//! Minimax with alpha-beta pruning.

use super::{NEG_INFINITY, POS_INFINITY, SearchConfig, SearchResult, SearchStats, parallel};
use crate::action::Action;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::types::Player;
use tracing::{debug, instrument, trace};

/// Alpha-beta searcher.
///
/// Holds the configuration and the counters of the most recent root search.
/// The tree itself lives on the call stack: each node owns its board value
/// and receives its bound pair by value.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    /// Creates a searcher with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters of the most recent [`Searcher::search`] call.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Returns the optimal move for the side to move.
    ///
    /// # Errors
    ///
    /// - [`GameError::PreconditionViolation`] if the board is terminal.
    /// - [`GameError::InvariantViolation`] if the board is corrupt.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn best_action(&mut self, board: &Board) -> GameResult<Action> {
        if board.is_terminal() {
            return Err(GameError::precondition(
                "best_action",
                format!("board {} is terminal", board),
            ));
        }

        self.search(board)?.action.ok_or_else(|| {
            GameError::precondition("best_action", format!("no move found on {}", board))
        })
    }

    /// Searches the board and returns its exact value and best move.
    ///
    /// A terminal board yields its utility and no move. X to move starts a
    /// maximizing node, O a minimizing one, both with the widest bounds.
    #[instrument(skip(self, board), fields(board = %board, parallel = self.config.parallel_root))]
    pub fn search(&mut self, board: &Board) -> GameResult<SearchResult> {
        self.stats = SearchStats::default();
        let player = board.side_to_move()?;

        let result = if self.config.parallel_root && !board.is_terminal() {
            let (result, stats) = parallel::search_root(board, player)?;
            self.stats = stats;
            result
        } else {
            self.evaluate(board, player, NEG_INFINITY, POS_INFINITY, 0)?
        };

        debug!(
            value = result.value,
            action = ?result.action,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            "Search complete"
        );
        Ok(result)
    }

    /// Evaluates `board` as the node type of `player` within `(alpha, beta)`.
    pub(super) fn evaluate(
        &mut self,
        board: &Board,
        player: Player,
        alpha: i8,
        beta: i8,
        ply: u8,
    ) -> GameResult<SearchResult> {
        match player {
            Player::X => self.max_value(board, alpha, beta, ply),
            Player::O => self.min_value(board, alpha, beta, ply),
        }
    }

    /// Counters accumulated so far, for callers driving [`Searcher::evaluate`].
    pub(super) fn take_stats(&mut self) -> SearchStats {
        std::mem::take(&mut self.stats)
    }

    fn enter(&mut self, ply: u8) {
        self.stats.nodes += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);
    }

    fn max_value(
        &mut self,
        board: &Board,
        mut alpha: i8,
        beta: i8,
        ply: u8,
    ) -> GameResult<SearchResult> {
        self.enter(ply);
        if board.is_terminal() {
            return Ok(SearchResult::terminal(board.utility()?));
        }

        let mut best = SearchResult {
            value: NEG_INFINITY,
            action: None,
        };
        for action in board.legal_actions() {
            let child = board.apply(action)?;
            let candidate = self.min_value(&child, alpha, beta, ply + 1)?.value;
            alpha = alpha.max(candidate);
            if candidate > best.value {
                best = SearchResult {
                    value: candidate,
                    action: Some(action),
                };
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                trace!(ply, %action, alpha, beta, "Max node cutoff");
                break;
            }
        }
        Ok(best)
    }

    fn min_value(
        &mut self,
        board: &Board,
        alpha: i8,
        mut beta: i8,
        ply: u8,
    ) -> GameResult<SearchResult> {
        self.enter(ply);
        if board.is_terminal() {
            return Ok(SearchResult::terminal(board.utility()?));
        }

        let mut best = SearchResult {
            value: POS_INFINITY,
            action: None,
        };
        for action in board.legal_actions() {
            let child = board.apply(action)?;
            let candidate = self.max_value(&child, alpha, beta, ply + 1)?.value;
            beta = beta.min(candidate);
            if candidate < best.value {
                best = SearchResult {
                    value: candidate,
                    action: Some(action),
                };
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                trace!(ply, %action, alpha, beta, "Min node cutoff");
                break;
            }
        }
        Ok(best)
    }
}

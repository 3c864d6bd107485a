//! Reports produced by the solver commands.

use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use strictly_tictactoe::{
    Action, Board, Player, SearchStats, Searcher, minimax_value, optimal_actions,
    reachable_boards,
};
use tracing::{info, instrument, warn};

/// Best move for one board, with the alternatives that are equally good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct BestMoveReport {
    /// Board that was searched.
    board: Board,
    /// Side to move on that board.
    side_to_move: Player,
    /// Move chosen by the alpha-beta search.
    action: Action,
    /// Exact value for X.
    value: i8,
    /// Every move with the same exact value, row-major.
    optimal_actions: Vec<Action>,
    /// Search counters.
    stats: SearchStats,
}

impl BestMoveReport {
    /// Searches `board` and collects the report.
    ///
    /// Callers must check terminality first; a terminal board is an error.
    #[instrument(skip(board, searcher), fields(board = %board))]
    pub fn compute(board: &Board, searcher: &mut Searcher) -> Result<Self> {
        let side_to_move = board.side_to_move()?;
        let alternatives = optimal_actions(board)?;
        let result = searcher.search(board)?;
        let action = result
            .action
            .with_context(|| format!("Search returned no move for {}", board))?;
        Ok(Self::new(
            *board,
            side_to_move,
            action,
            result.value,
            alternatives,
            *searcher.stats(),
        ))
    }

    /// Verbal form of the value from the mover's perspective.
    pub fn verdict(&self) -> &'static str {
        match (self.side_to_move, self.value) {
            (_, 0) => "draw with best play",
            (Player::X, 1) | (Player::O, -1) => "forced win",
            _ => "forced loss",
        }
    }
}

impl std::fmt::Display for BestMoveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board:        {}", self.board)?;
        writeln!(f, "To move:      {}", self.side_to_move)?;
        writeln!(f, "Best move:    {}", self.action)?;
        writeln!(f, "Value:        {:+} ({})", self.value, self.verdict())?;
        let alternatives: Vec<String> =
            self.optimal_actions.iter().map(ToString::to_string).collect();
        writeln!(f, "Also optimal: {}", alternatives.join(" "))?;
        write!(
            f,
            "Searched:     {} nodes, {} cutoffs, depth {}",
            self.stats.nodes, self.stats.cutoffs, self.stats.max_ply
        )
    }
}

/// A board where the pruned and unpruned values disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
pub struct Mismatch {
    /// The offending board.
    pub board: Board,
    /// Value from the alpha-beta search.
    pub pruned: i8,
    /// Value from exhaustive minimax.
    pub unpruned: i8,
}

/// Result of cross-checking alpha-beta against exhaustive minimax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Getters)]
pub struct VerifyReport {
    /// Non-terminal boards compared.
    boards_checked: usize,
    /// Nodes visited by the pruned search over all boards.
    pruned_nodes: u64,
    /// Cutoffs taken over all boards.
    cutoffs: u64,
    /// Disagreements; empty when pruning is exact.
    mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    /// Compares both searches on reachable non-terminal boards from `start`.
    ///
    /// At most `limit` boards are checked when a limit is given.
    #[instrument(skip(start, searcher), fields(start = %start))]
    pub fn run(start: &Board, searcher: &mut Searcher, limit: Option<usize>) -> Result<Self> {
        let mut report = Self::default();
        let boards = reachable_boards(start)?;

        for board in boards
            .iter()
            .filter(|b| !b.is_terminal())
            .take(limit.unwrap_or(usize::MAX))
        {
            let pruned = searcher.search(board)?.value;
            let unpruned = minimax_value(board)?;
            report.boards_checked += 1;
            report.pruned_nodes += searcher.stats().nodes;
            report.cutoffs += searcher.stats().cutoffs;

            if pruned != unpruned {
                warn!(%board, pruned, unpruned, "Pruned value differs from minimax");
                report.mismatches.push(Mismatch::new(*board, pruned, unpruned));
            }
        }

        info!(
            boards = report.boards_checked,
            mismatches = report.mismatches.len(),
            "Verification complete"
        );
        Ok(report)
    }

    /// True when every checked board agreed.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl std::fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Boards checked: {}", self.boards_checked)?;
        writeln!(f, "Pruned nodes:   {}", self.pruned_nodes)?;
        writeln!(f, "Cutoffs:        {}", self.cutoffs)?;
        write!(f, "Mismatches:     {}", self.mismatches.len())?;
        for m in &self.mismatches {
            write!(f, "\n  {} pruned={} minimax={}", m.board, m.pruned, m.unpruned)?;
        }
        Ok(())
    }
}

//! Interactive terminal game between a human and the engine.

use crate::config::SolverConfig;
use crate::render;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use strictly_tictactoe::{Action, Board, GameError, Outcome, Player, Searcher};
use tracing::{debug, info, instrument, warn};

/// A human-versus-engine game over line-oriented input and output.
///
/// The session owns the contract the core leaves to its callers: it never
/// applies a move to a finished board and checks terminality before asking
/// the engine for a move. Bad human input is reported and re-prompted.
pub struct PlaySession<R, W> {
    input: R,
    output: W,
    searcher: Searcher,
    human: Player,
    show_stats: bool,
}

impl<R: BufRead, W: Write> PlaySession<R, W> {
    /// Creates a session with the human playing the configured mark.
    #[instrument(skip_all, fields(human = %config.human_player()))]
    pub fn new(input: R, output: W, config: &SolverConfig) -> Self {
        Self {
            input,
            output,
            searcher: Searcher::new(*config.search()),
            human: *config.human_player(),
            show_stats: *config.show_stats(),
        }
    }

    /// Plays from `start` until the game ends.
    ///
    /// Returns `None` if the human quits or the input runs out.
    #[instrument(skip(self, start), fields(start = %start))]
    pub fn run(&mut self, start: Board) -> Result<Option<Outcome>> {
        let mut board = start;
        writeln!(
            self.output,
            "You are {}. Enter a cell as 'row,col' or an index 0-8; 'q' quits.",
            self.human
        )?;
        writeln!(self.output, "{}\n", render::grid(&board))?;

        loop {
            if let Some(outcome) = board.outcome() {
                writeln!(self.output, "Game over: {}", outcome)?;
                info!(%outcome, "Game finished");
                return Ok(Some(outcome));
            }

            let player = board.side_to_move()?;
            let next = if player == self.human {
                match self.human_move(&board, player)? {
                    Some(next) => next,
                    None => {
                        info!("Human left the game");
                        return Ok(None);
                    }
                }
            } else {
                self.engine_move(&board, player)?
            };

            board = next;
            writeln!(self.output, "{}\n", render::grid(&board))?;
        }
    }

    /// Prompts until the human enters a legal move; `None` on quit or EOF.
    fn human_move(&mut self, board: &Board, player: Player) -> Result<Option<Board>> {
        loop {
            write!(self.output, "Your move ({}): ", player)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read move from input")?;
            let line = line.trim();

            if read == 0 || line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                writeln!(self.output)?;
                return Ok(None);
            }
            if line.is_empty() {
                continue;
            }

            match line.parse::<Action>().and_then(|action| board.apply(action)) {
                Ok(next) => {
                    debug!(input = line, "Human move accepted");
                    return Ok(Some(next));
                }
                Err(e @ (GameError::IllegalMove { .. } | GameError::Parse { .. })) => {
                    warn!(input = line, error = %e, "Rejected human move");
                    writeln!(self.output, "{}. Try again.", e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn engine_move(&mut self, board: &Board, player: Player) -> Result<Board> {
        let action = self.searcher.best_action(board)?;
        writeln!(self.output, "Engine ({}) plays {}", player, action)?;
        if self.show_stats {
            let stats = self.searcher.stats();
            writeln!(
                self.output,
                "  searched {} nodes, {} cutoffs",
                stats.nodes, stats.cutoffs
            )?;
        }
        Ok(board.apply(action)?)
    }

    /// Consumes the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

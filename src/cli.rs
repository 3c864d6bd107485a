//! Command-line interface for strictly_solver.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_tictactoe::Player;

/// Strictly Solver - exact tic-tac-toe engine
#[derive(Parser, Debug)]
#[command(name = "strictly_solver")]
#[command(about = "Optimal tic-tac-toe moves by alpha-beta search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Search root moves in parallel (overrides the config file)
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the best move for a board such as "XX./OO./..."
    Best {
        /// Board in compact notation (rows separated by '/')
        board: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play against the engine in the terminal
    Play {
        /// Mark the human plays (overrides the config file)
        #[arg(long, value_enum)]
        human: Option<Mark>,

        /// Board to start from
        #[arg(long)]
        start: Option<String>,
    },

    /// Let the engine play both sides to the end
    SelfPlay {
        /// Board to start from
        #[arg(long)]
        start: Option<String>,

        /// Emit the playout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cross-check alpha-beta values against exhaustive minimax
    Verify {
        /// Check at most this many boards
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Mark selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mark {
    /// First player
    X,
    /// Second player
    O,
}

impl From<Mark> for Player {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Player::X,
            Mark::O => Player::O,
        }
    }
}

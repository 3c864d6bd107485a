//! Strictly Solver library - terminal front end for the tic-tac-toe engine
//!
//! This library wraps [`strictly_tictactoe`] with everything a user-facing
//! tool needs around the pure engine.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for the search and the interactive game
//! - **Session**: human-versus-engine play over any reader/writer pair
//! - **Reports**: best-move analysis and alpha-beta verification
//! - **Render**: plain-text board grids
//!
//! # Example
//!
//! ```
//! use strictly_solver::{BestMoveReport, Board, Searcher};
//!
//! let board: Board = "XX./OO./...".parse().unwrap();
//! let report = BestMoveReport::compute(&board, &mut Searcher::default()).unwrap();
//! assert_eq!(*report.value(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod render;
pub mod report;
pub mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, SolverConfig};

// Crate-level exports - Reports
pub use report::{BestMoveReport, Mismatch, VerifyReport};

// Crate-level exports - Interactive play
pub use session::PlaySession;

// Crate-level exports - Engine types
pub use strictly_tictactoe::{
    Action, Board, GameError, Line, Outcome, Player, Playout, SearchConfig, SearchResult,
    SearchStats, Searcher, Square, best_action, minimax_value, optimal_actions, play_out,
};

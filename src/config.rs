//! Solver configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tictactoe::{Player, SearchConfig};
use tracing::{debug, info, instrument};

/// Settings for the solver binary.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Search engine settings.
    #[serde(default)]
    search: SearchConfig,

    /// Mark the human plays in interactive games.
    #[serde(default = "default_human_player")]
    human_player: Player,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Print node and cutoff counts after each engine move.
    #[serde(default = "default_show_stats")]
    show_stats: bool,
}

#[instrument]
fn default_human_player() -> Player {
    Player::X
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

#[instrument]
fn default_show_stats() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            human_player: default_human_player(),
            log_filter: default_log_filter(),
            show_stats: default_show_stats(),
        }
    }
}

impl SolverConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(parallel_root = config.search.parallel_root, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the file when a path is given, defaults otherwise.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Returns a copy with the parallel root search switched on or off.
    #[instrument(skip(self))]
    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.search = self.search.with_parallel_root(parallel_root);
        self
    }

    /// Returns a copy with the human playing `player`.
    #[instrument(skip(self))]
    pub fn with_human_player(mut self, player: Player) -> Self {
        self.human_player = player;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

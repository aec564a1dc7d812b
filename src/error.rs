//! Error types

use thiserror::Error;

/// A rejected game operation. The board is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cannot place an empty stone")]
    EmptyStone,

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("the game is already over")]
    GameOver,

    #[error("board size {0} is not supported")]
    InvalidSize(usize),
}

/// Failure to load or validate a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

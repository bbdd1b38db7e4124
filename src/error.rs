use std::path::PathBuf;

use crate::game::{GameResult, MoveError};

/// Errors raised by the action-value approximator.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("board size must be > 0, got {0}")]
    InvalidBoardSize(usize),

    #[error("input vector has length {actual}, expected {expected}")]
    InputShape { expected: usize, actual: usize },

    #[error("target vector has length {actual}, expected {expected}")]
    TargetShape { expected: usize, actual: usize },

    #[error("batch has {inputs} inputs but {targets} targets")]
    BatchMismatch { inputs: usize, targets: usize },

    #[error("training batch is empty")]
    EmptyBatch,

    #[error("failed to read tensor data: {0}")]
    TensorData(String),
}

/// Errors raised while an agent plays or learns from a game.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("unexpected game result {0:?}")]
    UnexpectedResult(GameResult),

    #[error("move requested before new_game")]
    NoActiveGame,

    #[error("no legal move available")]
    NoLegalMove,

    #[error("value function covers {actual} cells, board has {expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

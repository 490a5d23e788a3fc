use std::path::PathBuf;

/// Errors returned by [`GameEngine`](crate::game::GameEngine) operations.
///
/// None of these are fatal: the engine state is left exactly as it was before
/// the failed call, and it is up to the caller to re-prompt or give up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    InvalidColumn { column: usize, columns: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("both players have the same identity")]
    DuplicatePlayer,

    #[error("no players registered yet")]
    NotInitialized,
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

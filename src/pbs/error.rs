use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting and plotting node load
#[derive(Debug, Error)]
pub enum LoadMapError {
    /// The node status command could not be spawned or exited with failure
    #[error("could not execute {command}: {reason}")]
    CommandFailed { command: PathBuf, reason: String },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON (node map, plot properties)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed pbsnodes output
    #[error("pbsnodes parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A hostname selected for plotting has no grid coordinate
    #[error("no coordinate for node '{0}'")]
    MissingCoordinate(String),

    /// Node map violates its invariants (empty labels, out-of-range coordinates)
    #[error("invalid node map: {0}")]
    InvalidNodeMap(String),

    /// Configuration error (unreadable properties file, bad values)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using LoadMapError
pub type Result<T> = std::result::Result<T, LoadMapError>;

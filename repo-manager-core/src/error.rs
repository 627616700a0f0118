//! Error types for repo-manager

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for repo-manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for repo-manager operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error tied to a specific path
    #[error("{}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Git metadata could not be read
    #[error("Git error: {0}")]
    Git(String),

    /// Configuration error
    #[error("{0}")]
    Config(String),

    /// Cloning failed
    #[error("{0}")]
    Clone(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an IO error with the path it occurred on
    pub fn path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Path {
            path: path.into(),
            source,
        }
    }
}

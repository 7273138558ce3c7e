//! Error types for skills-core

use std::path::PathBuf;

/// Result type for skills-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skills-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid count pattern for category '{category}': {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

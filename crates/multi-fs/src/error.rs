//! Error types for multi-fs

use std::path::PathBuf;

/// Result type for multi-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in multi-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find multi.json or multi.toml in {start} or any parent directory")]
    RootNotFound { start: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

//! Error types for multi-meta

use std::path::PathBuf;

/// Result type for multi-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in multi-meta operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No workspace manifest found at {root}")]
    ManifestNotFound { root: PathBuf },

    #[error("Failed to parse {format} manifest at {path}: {message}")]
    ManifestParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("The workspace manifest declares no repositories")]
    NoRepositories,

    #[error("Repository entry is missing a url")]
    MissingUrl,

    #[error(transparent)]
    Fs(#[from] multi_fs::Error),
}

//! Error types for multi-core

/// Result type for multi-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in multi-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] multi_fs::Error),

    #[error(transparent)]
    Meta(#[from] multi_meta::Error),

    #[error(transparent)]
    Git(#[from] multi_git::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

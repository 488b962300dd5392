//! Error types for multi-git

use std::path::PathBuf;

/// Result type for multi-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in multi-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A git invocation failed; carries the attempted action and the
    /// underlying git message.
    #[error("Failed to {action} in {path}: {message}")]
    Operation {
        action: String,
        path: PathBuf,
        message: String,
    },

    #[error("{path} is not a git repository (no .git directory)")]
    NotARepository { path: PathBuf },

    #[error("Working directory is not clean in {path}. Commit or stash changes first.")]
    RepoNotClean { path: PathBuf },

    #[error("Branch '{name}' does not exist locally or remotely in {path}")]
    BranchNotFound { name: String, path: PathBuf },

    #[error("Merge conflict in {path}: {message}")]
    MergeConflict { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] multi_fs::Error),
}

impl Error {
    /// Translate a git2 error into the uniform operation error.
    pub fn operation(action: impl Into<String>, path: impl Into<PathBuf>, err: &git2::Error) -> Self {
        Self::Operation {
            action: action.into(),
            path: path.into(),
            message: err.message().to_string(),
        }
    }
}

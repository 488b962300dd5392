//! Error types for multi-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] multi_core::Error),

    #[error(transparent)]
    Git(#[from] multi_git::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

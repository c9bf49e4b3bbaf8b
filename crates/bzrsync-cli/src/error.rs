//! Error types for bzrsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from bzrsync-core
    #[error(transparent)]
    Core(#[from] bzrsync_core::Error),

    /// Error from bzrsync-fs
    #[error(transparent)]
    Fs(#[from] bzrsync_fs::Error),

    /// Error from bzrsync-vcs
    #[error(transparent)]
    Vcs(#[from] bzrsync_vcs::VcsError),

    /// Invalid user input
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a user input error
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

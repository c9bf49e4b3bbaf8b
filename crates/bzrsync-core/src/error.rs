//! Error types for bzrsync-core

use bzrsync_vcs::VcsError;

/// Result type for bzrsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a sync
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Local modifications block a non-forced update
    #[error("{message}")]
    Precondition { message: String },

    /// An external command failed; the message is the tool's own error text
    #[error("{message}")]
    Execution { message: String },

    /// Orchestrator parameters are missing or malformed
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    /// Filesystem error from bzrsync-fs
    #[error(transparent)]
    Fs(#[from] bzrsync_fs::Error),
}

impl Error {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }
}

impl From<VcsError> for Error {
    fn from(err: VcsError) -> Self {
        let message = match &err {
            VcsError::CommandFailed { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            _ => err.to_string(),
        };
        Self::Execution { message }
    }
}

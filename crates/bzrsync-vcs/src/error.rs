//! Error types for bzrsync-vcs

use std::path::PathBuf;

/// Result type for bzrsync-vcs operations
pub type Result<T> = std::result::Result<T, VcsError>;

/// Errors that can occur while driving the `bzr` tool
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The command ran and exited with a non-zero status
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, or -1 when terminated by a signal
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The process could not be started at all
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bzr executable not found: {hint}")]
    ExecutableNotFound { hint: String },
}

//! Error types for bzrsync-fs

use std::path::PathBuf;

/// Result type for bzrsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bzrsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} parameters at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported parameter file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Cannot expand '~' in {path}: home directory is unknown")]
    HomeNotFound { path: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

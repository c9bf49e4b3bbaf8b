//! Filesystem helpers for bzr-sync
//!
//! Provides path normalization, destination resolution, branch marker
//! detection and format-agnostic parameter file loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::BranchPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, resolve_destination};

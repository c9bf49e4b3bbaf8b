//! Small filesystem operations used around a sync

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Create every missing ancestor directory of `path`.
///
/// The path itself is not created. Already existing directories are not an
/// error, so this is safe to call repeatedly.
pub fn ensure_parent_dirs(path: &NormalizedPath) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };

    let native = parent.to_native();
    if native.is_dir() {
        return Ok(());
    }

    tracing::debug!(path = %parent, "Creating parent directories");
    fs::create_dir_all(&native).map_err(|e| Error::io(&native, e))
}

//! Discovery of the `bzr` executable

use std::path::{Path, PathBuf};

use crate::{Result, VcsError};

/// Name searched on `PATH` when no explicit executable is configured.
pub const DEFAULT_EXECUTABLE: &str = "bzr";

/// Resolve the `bzr` executable to run.
///
/// An explicit path must point at an existing file; a relative one is
/// anchored at `cwd` so it stays valid whatever directory the command later
/// runs in. Otherwise `bzr` is looked up on `PATH`.
pub fn locate_executable(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        if path.is_file() {
            return Ok(path);
        }
        return Err(VcsError::ExecutableNotFound {
            hint: format!("{} does not exist", path.display()),
        });
    }

    which::which(DEFAULT_EXECUTABLE).map_err(|e| VcsError::ExecutableNotFound {
        hint: format!("could not find `{DEFAULT_EXECUTABLE}` on PATH ({e})"),
    })
}

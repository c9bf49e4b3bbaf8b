//! Parsing of `bzr status -S` output

/// Return the status lines that describe tracked-file modifications.
///
/// Untracked entries (a `?` in the versioning column) and blank lines
/// are ignored.
pub fn local_modifications(status: &str) -> Vec<&str> {
    status
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with('?'))
        .collect()
}

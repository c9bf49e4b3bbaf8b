//! A file-backed fake `bzr` executable.
//!
//! The script keeps all state in plain files so that the real `bzr-sync`
//! binary can be driven end to end without Bazaar installed:
//!
//! - an upstream branch is a directory holding a `revisions` file, one
//!   revision id per line, oldest first
//! - a working copy keeps `.bzr/branch/branch.conf` (parent location),
//!   `.bzr/history`, `.bzr/revno` and an optional `.bzr/status`

use std::fs;
use std::path::{Path, PathBuf};

const FAKE_BZR: &str = r#"#!/bin/sh
sub="$1"
shift
rev=""
if [ "$1" = "-r" ]; then
    rev="$2"
    shift 2
fi

fail() {
    echo "bzr: ERROR: $1" >&2
    exit 3
}

history_upto() {
    if [ -z "$2" ]; then
        cat "$1"
        return 0
    fi
    grep -qx "$2" "$1" || return 1
    sed "/^$2\$/q" "$1"
}

case "$sub" in
    branch)
        src="$1"
        dest="$2"
        [ -f "$src/revisions" ] || fail "Not a branch: \"$src\"."
        [ ! -e "$dest/.bzr" ] || fail "Target directory \"$dest\" already exists."
        hist=$(history_upto "$src/revisions" "$rev") || fail "Requested revision: '$rev' does not exist in branch: $src"
        mkdir -p "$dest/.bzr/branch" || exit 3
        echo "parent_location = $src" > "$dest/.bzr/branch/branch.conf"
        printf '%s\n' "$hist" > "$dest/.bzr/history"
        tail -n 1 "$dest/.bzr/history" > "$dest/.bzr/revno"
        ;;
    revno)
        [ -f .bzr/revno ] || fail "Not a branch: \"$PWD/\"."
        cat .bzr/revno
        ;;
    status)
        [ -d .bzr ] || fail "Not a branch: \"$PWD/\"."
        if [ -f .bzr/status ]; then
            cat .bzr/status
        fi
        ;;
    revert)
        if [ -n "$rev" ]; then
            grep -qx "$rev" .bzr/history || fail "Requested revision: '$rev' does not exist in branch"
            echo "$rev" > .bzr/revno
        else
            tail -n 1 .bzr/history > .bzr/revno
        fi
        if [ -f .bzr/status ]; then
            grep '^?' .bzr/status > .bzr/status.tmp
            mv .bzr/status.tmp .bzr/status
        fi
        ;;
    pull)
        src=$(sed -n 's/^parent_location = //p' .bzr/branch/branch.conf)
        [ -f "$src/revisions" ] || fail "Not a branch: \"$src\"."
        hist=$(history_upto "$src/revisions" "$rev") || fail "No revision $rev in $src"
        printf '%s\n' "$hist" > .bzr/history
        tail -n 1 .bzr/history > .bzr/revno
        ;;
    *)
        fail "unknown command \"$sub\""
        ;;
esac
exit 0
"#;

/// Write the fake `bzr` script into `dir` and return its path.
///
/// # Panics
/// Panics if the script cannot be written or made executable.
pub fn install_fake_bzr(dir: &Path) -> PathBuf {
    let path = dir.join("bzr");
    fs::write(&path, FAKE_BZR)
        .unwrap_or_else(|e| panic!("install_fake_bzr: failed to write script: {e}"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)
            .unwrap_or_else(|e| panic!("install_fake_bzr: failed to stat script: {e}"))
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)
            .unwrap_or_else(|e| panic!("install_fake_bzr: failed to chmod script: {e}"));
    }

    path
}

/// An upstream branch understood by the fake `bzr` script.
pub struct FakeUpstream {
    path: PathBuf,
}

impl FakeUpstream {
    /// Create an upstream branch at `path` with the given history.
    pub fn create(path: &Path, revisions: &[&str]) -> Self {
        fs::create_dir_all(path)
            .unwrap_or_else(|e| panic!("FakeUpstream: failed to create {}: {e}", path.display()));
        let upstream = Self {
            path: path.to_path_buf(),
        };
        upstream.write(revisions);
        upstream
    }

    /// Location to pass as the branch source.
    pub fn location(&self) -> &str {
        self.path
            .to_str()
            .unwrap_or_else(|| panic!("FakeUpstream: non UTF-8 path {}", self.path.display()))
    }

    /// Append revisions to the upstream history.
    pub fn push(&self, revisions: &[&str]) {
        let mut all = self.revisions();
        all.extend(revisions.iter().map(|r| r.to_string()));
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();
        self.write(&refs);
    }

    pub fn revisions(&self) -> Vec<String> {
        fs::read_to_string(self.path.join("revisions"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn write(&self, revisions: &[&str]) {
        let content: String = revisions.iter().map(|r| format!("{r}\n")).collect();
        fs::write(self.path.join("revisions"), content)
            .unwrap_or_else(|e| panic!("FakeUpstream: failed to write revisions: {e}"));
    }
}

/// Mark tracked files in a fake working copy as modified.
pub fn dirty_checkout(dest: &Path, status: &str) {
    fs::write(dest.join(".bzr/status"), status)
        .unwrap_or_else(|e| panic!("dirty_checkout: failed to write status: {e}"));
}

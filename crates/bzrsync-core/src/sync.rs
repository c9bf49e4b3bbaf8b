//! The branch synchronizer
//!
//! A sync is a single blocking pass:
//!
//! 1. resolve whether the destination already holds a working copy
//! 2. clone it fresh, or normalize the existing copy and pull
//! 3. switch the working copy to the target revision
//! 4. compare the revision before and after

use bzrsync_fs::{BranchPath, NormalizedPath, io};
use bzrsync_vcs::{Bzr, CommandRunner};

use crate::request::SyncRequest;
use crate::response::SyncResult;
use crate::{Error, Result};

/// Message used when local modifications block a non-forced sync.
pub const LOCAL_MODS_MESSAGE: &str = "Local modifications exist in branch (force=no).";

/// State of the destination, decided once at the start of a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCopy {
    /// No working copy yet; the branch must be cloned
    Fresh,
    /// A working copy from an earlier sync is present
    Existing,
}

impl LocalCopy {
    pub fn detect(destination: &NormalizedPath) -> Self {
        if destination.join(BranchPath::BranchConf.as_str()).exists() {
            Self::Existing
        } else {
            Self::Fresh
        }
    }
}

/// Brings a working copy to a requested revision using one `bzr` client.
#[derive(Debug)]
pub struct BranchSynchronizer<R> {
    bzr: Bzr<R>,
}

impl<R: CommandRunner> BranchSynchronizer<R> {
    pub fn new(bzr: Bzr<R>) -> Self {
        Self { bzr }
    }

    /// Run one sync.
    ///
    /// # Errors
    ///
    /// - [`Error::Precondition`] when tracked files are modified and
    ///   `request.force` is false. Nothing is fetched or switched.
    /// - [`Error::Execution`] when any `bzr` command fails, carrying its
    ///   error output.
    pub fn sync(&self, request: &SyncRequest) -> Result<SyncResult> {
        let dest = &request.destination;
        let local_copy = LocalCopy::detect(dest);
        tracing::info!(
            source = %request.source,
            dest = %dest,
            target = %request.target,
            ?local_copy,
            "Starting branch sync"
        );

        let (revision_before, local_mods) = match local_copy {
            LocalCopy::Fresh => {
                self.clone_fresh(request)?;
                (None, false)
            }
            LocalCopy::Existing => {
                let (before, local_mods) = self.update_existing(request)?;
                (Some(before), local_mods)
            }
        };

        self.bzr.revert(dest, request.target.revision())?;
        let revision_after = self.bzr.revno(dest)?;

        let result = SyncResult::new(revision_before, revision_after, local_mods);
        tracing::info!(
            changed = result.changed,
            before = ?result.revision_before,
            after = %result.revision_after,
            "Branch sync finished"
        );
        Ok(result)
    }

    fn clone_fresh(&self, request: &SyncRequest) -> Result<()> {
        io::ensure_parent_dirs(&request.destination)?;
        self.bzr.branch(
            &request.source,
            &request.destination,
            request.target.revision(),
        )?;
        Ok(())
    }

    /// Normalize an existing copy and fetch new history.
    ///
    /// Returns the revision sampled after the revert and before the pull,
    /// together with whether local modifications were present.
    fn update_existing(&self, request: &SyncRequest) -> Result<(String, bool)> {
        let dest = &request.destination;

        let local_mods = self.bzr.has_local_mods(dest)?;
        if local_mods && !request.force {
            return Err(Error::Precondition {
                message: LOCAL_MODS_MESSAGE.to_string(),
            });
        }
        if local_mods {
            tracing::warn!(dest = %dest, "Discarding local modifications");
        }

        self.bzr.revert(dest, None)?;
        let before = self.bzr.revno(dest)?;

        self.bzr.pull(dest, request.target.revision())?;
        Ok((before, local_mods))
    }
}

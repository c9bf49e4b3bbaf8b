//! Typed wrapper over the `bzr` sub-commands used by a sync

use std::path::PathBuf;

use bzrsync_fs::NormalizedPath;

use crate::runner::{CommandOutput, CommandRunner, Invocation};
use crate::status::local_modifications;
use crate::{Result, VcsError};

/// A `bzr` client bound to one executable and one command runner.
///
/// `revision` arguments of `None` mean the branch tip.
#[derive(Debug, Clone)]
pub struct Bzr<R> {
    executable: PathBuf,
    runner: R,
}

impl<R: CommandRunner> Bzr<R> {
    pub fn new(executable: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    /// Create a new branch of `source` at `dest`.
    ///
    /// Runs in the parent of `dest`, which must already exist.
    pub fn branch(&self, source: &str, dest: &NormalizedPath, revision: Option<&str>) -> Result<()> {
        let parent = dest
            .parent()
            .map(|p| p.to_native())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut invocation = Invocation::new(&self.executable).arg("branch");
        if let Some(rev) = revision {
            invocation = invocation.args(["-r", rev]);
        }
        let invocation = invocation
            .arg(source)
            .arg(dest.as_str())
            .in_dir(parent);

        self.checked(&invocation)?;
        Ok(())
    }

    /// Current revision number of the working copy at `dir`.
    pub fn revno(&self, dir: &NormalizedPath) -> Result<String> {
        let invocation = Invocation::new(&self.executable)
            .arg("revno")
            .in_dir(dir.to_native());
        let output = self.checked(&invocation)?;
        Ok(output.stdout.trim().to_string())
    }

    /// Raw short status listing of the working copy at `dir`.
    pub fn status_short(&self, dir: &NormalizedPath) -> Result<String> {
        let invocation = Invocation::new(&self.executable)
            .args(["status", "-S"])
            .in_dir(dir.to_native());
        Ok(self.checked(&invocation)?.stdout)
    }

    /// Whether tracked files in `dir` differ from the last revision.
    pub fn has_local_mods(&self, dir: &NormalizedPath) -> Result<bool> {
        let status = self.status_short(dir)?;
        let modified = local_modifications(&status);
        if !modified.is_empty() {
            tracing::debug!(count = modified.len(), path = %dir, "Local modifications found");
        }
        Ok(!modified.is_empty())
    }

    /// Revert the working copy at `dir`, optionally to a specific revision.
    pub fn revert(&self, dir: &NormalizedPath, revision: Option<&str>) -> Result<()> {
        let mut invocation = Invocation::new(&self.executable).arg("revert");
        if let Some(rev) = revision {
            invocation = invocation.args(["-r", rev]);
        }
        self.checked(&invocation.in_dir(dir.to_native()))?;
        Ok(())
    }

    /// Pull new history from the parent branch into `dir`.
    pub fn pull(&self, dir: &NormalizedPath, revision: Option<&str>) -> Result<()> {
        let mut invocation = Invocation::new(&self.executable).arg("pull");
        if let Some(rev) = revision {
            invocation = invocation.args(["-r", rev]);
        }
        self.checked(&invocation.in_dir(dir.to_native()))?;
        Ok(())
    }

    fn checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = self.runner.run(invocation)?;
        if output.success() {
            return Ok(output);
        }

        tracing::debug!(
            command = %invocation.display(),
            code = output.code,
            stderr = %output.stderr.trim(),
            "bzr command failed"
        );
        Err(VcsError::CommandFailed {
            command: invocation.display(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        })
    }
}

//! In-memory model of the handful of `bzr` behaviours a sync relies on.
//!
//! One upstream branch and at most one working copy. The working copy's
//! marker file is written to disk so that local-copy detection sees it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bzrsync_fs::{BranchPath, NormalizedPath};
use bzrsync_vcs::{CommandOutput, CommandRunner, Invocation};

#[derive(Debug, Default)]
struct State {
    upstream: Vec<String>,
    history: Vec<String>,
    revno: String,
    status: String,
    failures: HashMap<String, (i32, String)>,
}

/// A fake `bzr` that records every invocation it receives.
#[derive(Debug, Default)]
pub struct FakeBzr {
    state: RefCell<State>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeBzr {
    /// An upstream branch whose history is `revisions`, oldest first.
    pub fn with_upstream(revisions: &[&str]) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().upstream = revisions.iter().map(|r| r.to_string()).collect();
        fake
    }

    /// Pretend `dest` already holds a checkout whose history ends at `revno`.
    ///
    /// # Panics
    /// Panics if `revno` is not part of the upstream history or the marker
    /// file cannot be written.
    pub fn with_checkout(self, dest: &Path, revno: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.history = history_upto(&state.upstream, Some(revno))
                .unwrap_or_else(|| panic!("FakeBzr: revision {revno} not upstream"));
            state.revno = revno.to_string();
        }
        write_marker(dest);
        self
    }

    /// Status lines returned by `bzr status -S`.
    pub fn with_status(self, status: &str) -> Self {
        self.state.borrow_mut().status = status.to_string();
        self
    }

    /// Make `subcommand` exit with `code` and `stderr`.
    pub fn fail_on(self, subcommand: &str, code: i32, stderr: &str) -> Self {
        self.state
            .borrow_mut()
            .failures
            .insert(subcommand.to_string(), (code, stderr.to_string()));
        self
    }

    /// Append new revisions to the upstream branch.
    pub fn push_upstream(&self, revisions: &[&str]) {
        let mut state = self.state.borrow_mut();
        state
            .upstream
            .extend(revisions.iter().map(|r| r.to_string()));
    }

    /// Replace the current status listing.
    pub fn set_status(&self, status: &str) {
        self.state.borrow_mut().status = status.to_string();
    }

    /// All invocations received so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Invocations of `subcommand`, rendered as their argument lists.
    pub fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.args.first().map(String::as_str) == Some(subcommand))
            .map(|c| c.args.clone())
            .collect()
    }

    /// First argument of every invocation, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| c.args.first().cloned())
            .collect()
    }

    /// Current working copy revision.
    pub fn revno(&self) -> String {
        self.state.borrow().revno.clone()
    }

    fn respond(&self, invocation: &Invocation) -> CommandOutput {
        let (subcommand, revision, rest) = split_args(&invocation.args);

        if let Some((code, stderr)) = self.state.borrow().failures.get(subcommand) {
            return failed(*code, stderr);
        }

        let mut state = self.state.borrow_mut();
        match subcommand {
            "branch" => {
                let Some(dest) = rest.get(1) else {
                    return failed(3, "bzr: ERROR: command 'branch' needs a destination");
                };
                let Some(history) = history_upto(&state.upstream, revision) else {
                    return missing_revision(revision);
                };
                state.revno = history.last().cloned().unwrap_or_else(|| "0".into());
                state.history = history;
                write_marker(Path::new(dest));
                ok("")
            }
            "revno" => ok(&format!("{}\n", state.revno)),
            "status" => ok(&state.status),
            "revert" => {
                match revision {
                    Some(rev) if !state.history.iter().any(|r| r == rev) => {
                        return missing_revision(revision);
                    }
                    Some(rev) => state.revno = rev.to_string(),
                    None => state.revno = state.history.last().cloned().unwrap_or_default(),
                }
                state.status = state
                    .status
                    .lines()
                    .filter(|l| l.starts_with('?'))
                    .map(|l| format!("{l}\n"))
                    .collect();
                ok("")
            }
            "pull" => {
                let Some(history) = history_upto(&state.upstream, revision) else {
                    return missing_revision(revision);
                };
                state.revno = history.last().cloned().unwrap_or_default();
                state.history = history;
                ok("")
            }
            other => failed(3, &format!("bzr: ERROR: unknown command \"{other}\"")),
        }
    }
}

impl CommandRunner for FakeBzr {
    fn run(&self, invocation: &Invocation) -> bzrsync_vcs::Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(self.respond(invocation))
    }
}

fn split_args(args: &[String]) -> (&str, Option<&str>, &[String]) {
    let subcommand = args.first().map(String::as_str).unwrap_or("");
    let rest = args.get(1..).unwrap_or(&[]);
    if rest.first().map(String::as_str) == Some("-r") {
        (subcommand, rest.get(1).map(String::as_str), rest.get(2..).unwrap_or(&[]))
    } else {
        (subcommand, None, rest)
    }
}

fn history_upto(upstream: &[String], revision: Option<&str>) -> Option<Vec<String>> {
    match revision {
        None => Some(upstream.to_vec()),
        Some(rev) => {
            let idx = upstream.iter().position(|r| r == rev)?;
            Some(upstream[..=idx].to_vec())
        }
    }
}

fn write_marker(dest: &Path) {
    let marker = NormalizedPath::new(dest).join(BranchPath::BranchConf.as_str());
    let native = marker.to_native();
    if let Some(parent) = native.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("FakeBzr: failed to create {}: {e}", parent.display()));
    }
    fs::write(&native, "parent_location = fake\n")
        .unwrap_or_else(|e| panic!("FakeBzr: failed to write marker: {e}"));
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn failed(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        code,
        stdout: String::new(),
        stderr: format!("{stderr}\n"),
    }
}

fn missing_revision(revision: Option<&str>) -> CommandOutput {
    failed(
        3,
        &format!(
            "bzr: ERROR: Requested revision: '{}' does not exist in branch",
            revision.unwrap_or("")
        ),
    )
}

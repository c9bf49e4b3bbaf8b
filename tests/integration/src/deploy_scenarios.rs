//! Deployment scenarios through the real process runner
//!
//! Each test drives `BranchSynchronizer` with `SystemRunner` and the
//! file-backed fake `bzr`, starting from orchestrator parameters.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use bzrsync_core::{BranchSynchronizer, ModuleResponse, SyncParams, SyncResult};
use bzrsync_fs::{ConfigStore, NormalizedPath};
use bzrsync_test_utils::{FakeUpstream, dirty_checkout, install_fake_bzr};
use bzrsync_vcs::{Bzr, SystemRunner, locate_executable};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

struct Deploy {
    temp: TempDir,
    upstream: FakeUpstream,
}

impl Deploy {
    fn new(revisions: &[&str]) -> Self {
        let temp = TempDir::new().unwrap();
        install_fake_bzr(temp.path());
        let upstream = FakeUpstream::create(&temp.path().join("upstream"), revisions);
        Self { temp, upstream }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn params(&self, version: &str, force: bool) -> SyncParams {
        SyncParams {
            name: Some(self.upstream.location().to_string()),
            dest: Some("www/app".into()),
            version: Some(version.into()),
            force: Some(force),
            executable: Some(self.root().join("bzr")),
        }
    }

    fn run(&self, params: SyncParams) -> ModuleResponse {
        let executable = locate_executable(params.executable.as_deref(), self.root()).unwrap();
        let result = params.into_request(self.root()).and_then(|request| {
            BranchSynchronizer::new(Bzr::new(executable, SystemRunner)).sync(&request)
        });
        result.into()
    }
}

fn success(before: Option<&str>, after: &str, changed: bool) -> ModuleResponse {
    ModuleResponse::Success(SyncResult {
        changed,
        revision_before: before.map(str::to_string),
        revision_after: after.into(),
    })
}

#[test]
fn test_release_rollout_sequence() {
    let deploy = Deploy::new(&["1", "2", "3"]);

    // Initial deploy pinned to a release
    assert_eq!(deploy.run(deploy.params("2", true)), success(None, "2", true));

    // Re-running the same play changes nothing
    assert_eq!(
        deploy.run(deploy.params("2", true)),
        success(Some("2"), "2", false)
    );

    // A new release lands upstream and the play moves to the tip
    deploy.upstream.push(&["4"]);
    assert_eq!(
        deploy.run(deploy.params("head", true)),
        success(Some("2"), "4", true)
    );

    // Rolling back to an older revision
    assert_eq!(
        deploy.run(deploy.params("3", true)),
        success(Some("4"), "3", true)
    );
}

#[test]
fn test_hotfix_on_server_blocks_unforced_deploy() {
    let deploy = Deploy::new(&["1", "2"]);
    deploy.run(deploy.params("1", true));
    dirty_checkout(&deploy.root().join("www/app"), " M  settings.py\n");

    let blocked = deploy.run(deploy.params("2", false));
    assert_eq!(
        serde_json::to_value(&blocked).unwrap(),
        json!({"failed": true, "msg": "Local modifications exist in branch (force=no)."})
    );

    let forced = deploy.run(deploy.params("2", true));
    assert_eq!(forced, success(Some("1"), "2", true));
}

#[test]
fn test_args_file_drives_deploy() {
    let deploy = Deploy::new(&["10", "11"]);
    let args_path = deploy.root().join("args.toml");
    fs::write(
        &args_path,
        format!(
            "parent = \"{}\"\ndest = \"www/app\"\nforce = \"no\"\nexecutable = \"{}\"\n",
            deploy.upstream.location(),
            deploy.root().join("bzr").display()
        ),
    )
    .unwrap();

    let params: SyncParams = ConfigStore::new()
        .load(&NormalizedPath::new(&args_path))
        .unwrap();
    assert_eq!(params.force, Some(false));
    assert_eq!(params.version, None);

    assert_eq!(deploy.run(params), success(None, "11", true));
}

#[test]
fn test_missing_upstream_revision_fails_with_tool_text() {
    let deploy = Deploy::new(&["1"]);

    let response = deploy.run(deploy.params("7", true));

    match response {
        ModuleResponse::Failure { failed, msg } => {
            assert!(failed);
            assert!(msg.starts_with("bzr: ERROR: Requested revision: '7'"), "{msg}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!deploy.root().join("www/app/.bzr").exists());
}

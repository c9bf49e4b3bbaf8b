//! CLI end-to-end tests that invoke the compiled `bzr-sync` binary against
//! the file-backed fake `bzr`.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use bzrsync_test_utils::{FakeUpstream, dirty_checkout, install_fake_bzr};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

struct Env {
    temp: TempDir,
    bzr: PathBuf,
    upstream: FakeUpstream,
}

impl Env {
    fn new(revisions: &[&str]) -> Self {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let bzr = install_fake_bzr(&bin);
        let upstream = FakeUpstream::create(&temp.path().join("upstream"), revisions);
        Self {
            temp,
            bzr,
            upstream,
        }
    }

    fn dest(&self) -> PathBuf {
        self.temp.path().join("deploy/site")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bzr-sync"));
        cmd.current_dir(self.temp.path())
            .env_remove("RUST_LOG")
            .arg("--executable")
            .arg(&self.bzr);
        cmd
    }

    fn sync(&self, extra: &[&str]) -> (bool, Value) {
        let output = self
            .cmd()
            .arg("--name")
            .arg(self.upstream.location())
            .arg("--dest")
            .arg(self.dest())
            .args(extra)
            .output()
            .unwrap();
        let record = parse_record(&output.stdout);
        (output.status.success(), record)
    }
}

fn parse_record(stdout: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stdout);
    serde_json::from_str(text.trim()).unwrap_or_else(|e| panic!("bad record {text:?}: {e}"))
}

fn revno(dest: &Path) -> String {
    fs::read_to_string(dest.join(".bzr/revno")).unwrap().trim().to_string()
}

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("bzr-sync")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dest"));
}

#[test]
fn test_fresh_clone_reports_changed() {
    let env = Env::new(&["1", "2", "3"]);

    let (ok, record) = env.sync(&[]);

    assert!(ok);
    assert_eq!(record, json!({"changed": true, "before": null, "after": "3"}));
    assert!(env.dest().join(".bzr/branch/branch.conf").is_file());
}

#[test]
fn test_second_run_is_unchanged() {
    let env = Env::new(&["1", "2", "3"]);

    env.sync(&["--version", "2"]);
    let (ok, record) = env.sync(&["--version", "2"]);

    assert!(ok);
    assert_eq!(record, json!({"changed": false, "before": "2", "after": "2"}));
}

#[test]
fn test_existing_copy_moves_to_new_upstream_tip() {
    let env = Env::new(&["1"]);
    env.sync(&[]);
    env.upstream.push(&["2", "3"]);

    let (ok, record) = env.sync(&["--version", "HEAD"]);

    assert!(ok);
    assert_eq!(record, json!({"changed": true, "before": "1", "after": "3"}));
    assert_eq!(revno(&env.dest()), "3");
}

#[test]
fn test_local_modifications_without_force_fail() {
    let env = Env::new(&["1", "2"]);
    env.sync(&["--version", "1"]);
    dirty_checkout(&env.dest(), " M  index.html\n");

    let (ok, record) = env.sync(&["--version", "2", "--force", "no"]);

    assert!(!ok);
    assert_eq!(
        record,
        json!({"failed": true, "msg": "Local modifications exist in branch (force=no)."})
    );
    assert_eq!(revno(&env.dest()), "1");
}

#[test]
fn test_local_modifications_with_force_are_discarded() {
    let env = Env::new(&["1", "2"]);
    env.sync(&[]);
    dirty_checkout(&env.dest(), " M  index.html\n?   scratch.txt\n");

    let (ok, record) = env.sync(&["--force", "yes"]);

    assert!(ok);
    assert_eq!(record, json!({"changed": true, "before": "2", "after": "2"}));
    let status = fs::read_to_string(env.dest().join(".bzr/status")).unwrap();
    assert_eq!(status, "?   scratch.txt\n");
}

#[test]
fn test_unknown_branch_reports_tool_error() {
    let env = Env::new(&["1"]);

    let output = env
        .cmd()
        .args(["--name", "/nowhere/branch", "--dest"])
        .arg(env.dest())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let record = parse_record(&output.stdout);
    assert_eq!(record["failed"], json!(true));
    assert_eq!(
        record["msg"],
        json!("bzr: ERROR: Not a branch: \"/nowhere/branch\".")
    );
}

#[test]
fn test_args_file_with_parent_alias() {
    let env = Env::new(&["1", "2", "3"]);
    let args = env.temp.path().join("args.yaml");
    fs::write(
        &args,
        format!(
            "parent: {}\ndest: deploy/site\nversion: \"2\"\nforce: yes\n",
            env.upstream.location()
        ),
    )
    .unwrap();

    let output = env.cmd().arg("--args-file").arg(&args).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        parse_record(&output.stdout),
        json!({"changed": true, "before": null, "after": "2"})
    );
}

#[test]
fn test_missing_dest_is_reported_as_record() {
    let env = Env::new(&["1"]);

    env.cmd()
        .args(["--name", "lp:site"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#""msg":"Invalid parameters: missing required argument: dest""#,
        ));
}

#[test]
fn test_text_format() {
    let env = Env::new(&["1"]);

    let output = env
        .cmd()
        .arg("--name")
        .arg(env.upstream.location())
        .arg("--dest")
        .arg(env.dest())
        .args(["--format", "text"])
        .env("NO_COLOR", "1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CHANGED"), "{stdout}");
    assert!(stdout.contains("-> 1"), "{stdout}");
}

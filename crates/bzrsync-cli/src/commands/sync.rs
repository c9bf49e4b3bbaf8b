//! The sync command
//!
//! Binds parameters, runs one branch sync and reports the result record.

use std::path::Path;

use colored::Colorize;

use bzrsync_core::{BranchSynchronizer, ModuleResponse, SyncParams, SyncResult};
use bzrsync_fs::{ConfigStore, resolve_destination};
use bzrsync_vcs::{Bzr, SystemRunner, locate_executable};

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, Result};

/// Run a sync for the parsed command line, resolving relative paths against `cwd`.
pub fn run_sync(cli: &Cli, cwd: &Path) -> ModuleResponse {
    let response: ModuleResponse = sync_with_params(cli, cwd).into();
    if let ModuleResponse::Failure { msg, .. } = &response {
        tracing::error!(error = %msg, "Branch sync failed");
    }
    response
}

fn sync_with_params(cli: &Cli, cwd: &Path) -> Result<SyncResult> {
    let params = load_params(cli, cwd)?;
    let explicit = params.executable.clone();
    let request = params.into_request(cwd)?;
    let executable = locate_executable(explicit.as_deref(), cwd)?;
    tracing::debug!(executable = %executable.display(), "Using bzr executable");

    let synchronizer = BranchSynchronizer::new(Bzr::new(executable, SystemRunner));
    Ok(synchronizer.sync(&request)?)
}

/// Merge args-file parameters with flags; flags take precedence.
fn load_params(cli: &Cli, cwd: &Path) -> Result<SyncParams> {
    let base = match &cli.args_file {
        Some(file) => {
            let raw = file.to_str().ok_or_else(|| {
                CliError::user(format!("args file path is not valid UTF-8: {}", file.display()))
            })?;
            let path = resolve_destination(raw, cwd)?;
            tracing::debug!(path = %path, "Loading parameters from args file");
            ConfigStore::new().load::<SyncParams>(&path)?
        }
        None => SyncParams::default(),
    };
    Ok(base.overlay(cli.flag_params()))
}

/// Print the response in the requested format and return the exit code.
pub fn emit(response: &ModuleResponse, format: OutputFormat) -> i32 {
    match format {
        OutputFormat::Json => match response.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{}: failed to serialize result: {}", "error".red().bold(), e);
                return 1;
            }
        },
        OutputFormat::Text => print_text(response),
    }

    if response.is_failure() { 1 } else { 0 }
}

fn print_text(response: &ModuleResponse) {
    match response {
        ModuleResponse::Success(result) => {
            let before = result.revision_before.as_deref().unwrap_or("none");
            if result.changed {
                println!(
                    "{} {} -> {}",
                    "CHANGED".yellow().bold(),
                    before.dimmed(),
                    result.revision_after.cyan()
                );
            } else {
                println!(
                    "{} already at {}",
                    "OK".green().bold(),
                    result.revision_after.cyan()
                );
            }
        }
        ModuleResponse::Failure { msg, .. } => {
            eprintln!("{}: {}", "error".red().bold(), msg);
        }
    }
}

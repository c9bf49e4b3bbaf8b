//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use bzrsync_core::{SyncParams, parse_bool};

/// bzr-sync - Bring a Bazaar working copy to a given revision
///
/// Parameters come from flags, from an orchestrator args file, or both;
/// flags win over the file. The result is printed as a single JSON record.
///
/// Examples:
///   bzr-sync --name lp:myproject --dest /srv/myproject
///   bzr-sync --parent lp:myproject --dest ~/src/myproject --version 42 --force no
///   bzr-sync --args-file /tmp/module-args.json
#[derive(Parser, Debug)]
#[command(name = "bzr-sync")]
#[command(author, about, long_about)]
pub struct Cli {
    /// Remote branch location
    #[arg(short, long, visible_alias = "parent")]
    pub name: Option<String>,

    /// Absolute path of the working copy
    #[arg(short, long)]
    pub dest: Option<String>,

    /// Revision to sync to, or "head" for the latest
    #[arg(long, visible_alias = "revision")]
    pub version: Option<String>,

    /// Discard local modifications (yes/no)
    #[arg(short, long, value_parser = parse_force)]
    pub force: Option<bool>,

    /// Path to the bzr executable (searched on PATH otherwise)
    #[arg(long, env = "BZR_SYNC_EXECUTABLE")]
    pub executable: Option<PathBuf>,

    /// Read parameters from a JSON, TOML or YAML file
    #[arg(long, value_name = "FILE")]
    pub args_file: Option<PathBuf>,

    /// Output format of the result record
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the result is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON record for orchestrators
    Json,
    /// Colored human-readable summary
    Text,
}

impl Cli {
    /// Parameters given as flags, to be layered over any args file.
    pub fn flag_params(&self) -> SyncParams {
        SyncParams {
            name: self.name.clone(),
            dest: self.dest.clone(),
            version: self.version.clone(),
            force: self.force,
            executable: self.executable.clone(),
        }
    }
}

fn parse_force(value: &str) -> Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("expected yes or no, got '{value}'"))
}

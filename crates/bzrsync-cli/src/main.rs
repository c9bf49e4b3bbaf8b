//! bzr-sync CLI
//!
//! Synchronizes a Bazaar working copy and prints the orchestrator record.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use bzrsync_core::ModuleResponse;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }

    let response = match std::env::current_dir() {
        Ok(cwd) => commands::run_sync(&cli, &cwd),
        Err(e) => ModuleResponse::failure(format!("cannot read current directory: {e}")),
    };

    std::process::exit(commands::emit(&response, cli.format));
}

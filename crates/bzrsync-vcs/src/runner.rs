//! External command execution

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Result, VcsError};

/// A single external command: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Start building an invocation of `program` in the current directory.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: PathBuf::from("."),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command with `dir` as its working directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn display(&self) -> String {
        let mut rendered = self.program.display().to_string();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Executes invocations to completion.
///
/// Implementations return `Ok` for any command that ran, whatever its exit
/// code; `Err` means the process could not be started.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        tracing::debug!(
            command = %invocation.display(),
            cwd = %invocation.working_dir.display(),
            "Running external command"
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .output()
            .map_err(|source| VcsError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        tracing::debug!(code = result.code, "External command finished");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_system_runner_captures_output_and_cwd() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("sh")
            .args(["-c", "pwd; echo oops >&2; exit 3"])
            .in_dir(temp.path());

        let output = SystemRunner.run(&invocation).unwrap();

        assert_eq!(output.code, 3);
        assert!(!output.success());
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(temp.path()).unwrap());
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let invocation = Invocation::new("/nonexistent/bzr-sync-test-binary");
        let err = SystemRunner.run(&invocation).unwrap_err();
        assert!(matches!(err, VcsError::Spawn { .. }));
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::new("bzr").args(["pull", "-r", "7"]);
        assert_eq!(invocation.display(), "bzr pull -r 7");
    }
}

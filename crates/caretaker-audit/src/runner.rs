//! External tool invocation

use std::path::Path;
use std::process::Command;

use caretaker_core::error::ToolError;
use tracing::{debug, instrument};

/// Captured result of a finished tool process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl ToolOutput {
    /// Create an output with the given exit code and stdout
    pub fn new(status: i32, stdout: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Set stderr
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Seam between the auditors and the processes they drive
pub trait ToolRunner {
    /// Check whether `program` can be found
    fn is_available(&self, program: &str) -> bool;

    /// Run `program` to completion in `cwd` and capture its output
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ToolOutput, ToolError>;
}

/// Runs real processes found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new runner
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok() || which::which(format!("{}.exe", program)).is_ok()
    }

    #[instrument(skip(self, args), fields(arg_count = args.len()))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ToolOutput, ToolError> {
        // Resolve through `which` so that `npm.cmd` and friends work on Windows
        let executable = which::which(program).map_err(|_| ToolError::NotFound(program.to_string()))?;

        let output = Command::new(executable)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ToolError::SpawnFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        let result = ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            program,
            status = ?result.status,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "tool finished"
        );
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_output_success() {
        assert!(ToolOutput::new(0, "").success());
        assert!(!ToolOutput::new(1, "").success());
        assert!(!ToolOutput::default().success());
    }

    #[test]
    fn test_missing_program_is_not_available() {
        let runner = SystemRunner::new();
        assert!(!runner.is_available("caretaker-definitely-not-installed"));
    }

    #[test]
    fn test_run_missing_program() {
        let runner = SystemRunner::new();
        let result = runner.run(
            "caretaker-definitely-not-installed",
            &[],
            Path::new("."),
        );
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}

use crate::command_spec::CommandSpec;
use crate::error::RunnerError;

// ============================================================================
// ProcessRunner Trait - tool execution interface
// ============================================================================

/// Raw result of one tool execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Get stderr as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string evaluation)
/// and MUST report a non-zero exit through [`ProcessOutput::exit_code`]
/// rather than as an error. Execution is blocking and has no timeout.
///
/// # Example
///
/// ```rust
/// use lintwrap_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
///
/// struct CannedRunner(&'static str);
///
/// impl ProcessRunner for CannedRunner {
///     fn run(&self, _cmd: &CommandSpec) -> Result<ProcessOutput, RunnerError> {
///         Ok(ProcessOutput::new(self.0.as_bytes().to_vec(), Vec::new(), Some(0)))
///     }
/// }
///
/// let runner = CannedRunner("a.py:1: E501 line too long\n");
/// let output = runner.run(&CommandSpec::new("pycodestyle")).unwrap();
/// assert!(output.stdout_string().contains("E501"));
/// ```
pub trait ProcessRunner: Send + Sync {
    /// Execute `cmd` to completion.
    fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, RunnerError>;
}

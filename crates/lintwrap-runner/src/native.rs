use std::io::{ErrorKind, Write};
use std::process::Stdio;
use std::thread;

use tracing::debug;

use crate::command_spec::CommandSpec;
use crate::error::RunnerError;
use crate::process::{ProcessOutput, ProcessRunner};

// ============================================================================
// NativeRunner - std::process execution
// ============================================================================

/// Process runner using `std::process::Command`.
///
/// Both output streams are always captured; which of them the caller actually
/// interprets is decided later. Stdin input is written from a separate thread
/// so a tool that produces a lot of output before reading its input cannot
/// deadlock against us.
///
/// # Example
///
/// ```rust,no_run
/// use lintwrap_runner::{CommandSpec, NativeRunner, ProcessRunner};
///
/// let output = NativeRunner::new()
///     .run(&CommandSpec::new("cat").stdin("hello\n"))
///     .unwrap();
/// assert_eq!(output.stdout_string(), "hello\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, RunnerError> {
        let program = cmd.display_program();
        debug!(program = %program, args = ?cmd.args, cwd = ?cmd.cwd, "Spawning tool");

        let mut command = cmd.to_command();
        command
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| RunnerError::SpawnFailed {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        let writer = match (cmd.stdin.clone(), child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(thread::spawn(move || {
                // Dropping `pipe` at the end of the closure closes the stream
                match pipe.write_all(&input) {
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                    _ => Ok(()),
                }
            })),
            _ => None,
        };

        let output = child
            .wait_with_output()
            .map_err(|e| RunnerError::NativeExecutionFailed {
                reason: format!("Failed to wait for process '{program}': {e}"),
            })?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    return Err(RunnerError::StdinFailed {
                        program,
                        reason: e.to_string(),
                    });
                }
                Err(_) => {
                    return Err(RunnerError::StdinFailed {
                        program,
                        reason: "stdin writer thread panicked".to_string(),
                    });
                }
            }
        }

        debug!(program = %program, exit_code = ?output.status.code(), "Tool finished");
        Ok(ProcessOutput::new(
            output.stdout,
            output.stderr,
            output.status.code(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_runner_nonexistent_command() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("this_command_definitely_does_not_exist_12345");

        match runner.run(&cmd) {
            Err(RunnerError::SpawnFailed { program, .. }) => {
                assert_eq!(program, "this_command_definitely_does_not_exist_12345");
            }
            other => panic!("Expected SpawnFailed error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_exit_code_propagation() {
        let cmd = CommandSpec::new("sh").arg("-c").arg("exit 42");
        let output = NativeRunner::new().run(&cmd).unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(42));
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_captures_both_streams() {
        let cmd = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo out; echo 'error message' >&2");
        let output = NativeRunner::new().run(&cmd).unwrap();
        assert_eq!(output.stdout_string(), "out\n");
        assert_eq!(output.stderr_string(), "error message\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_pipes_stdin() {
        let cmd = CommandSpec::new("cat").stdin("line 1\nline 2\n");
        let output = NativeRunner::new().run(&cmd).unwrap();
        assert_eq!(output.stdout_string(), "line 1\nline 2\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_ignores_unread_stdin() {
        // `true` exits without reading; the broken pipe is not an error
        let cmd = CommandSpec::new("true").stdin(vec![b'x'; 1 << 20]);
        let output = NativeRunner::new().run(&cmd).unwrap();
        assert!(output.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_native_runner_uses_cwd_and_env() {
        let dir = std::env::temp_dir();
        let cmd = CommandSpec::new("sh")
            .arg("-c")
            .arg("pwd; printf '%s' \"$LINTWRAP_TEST_VAR\"")
            .cwd(&dir)
            .env("LINTWRAP_TEST_VAR", "value");
        let output = NativeRunner::new().run(&cmd).unwrap();
        let stdout = output.stdout_string();
        assert!(stdout.ends_with("value"));
        let reported = std::path::PathBuf::from(stdout.lines().next().unwrap());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.canonicalize().unwrap()
        );
    }
}

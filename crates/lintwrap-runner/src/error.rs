//! Error types for the runner crate

use thiserror::Error;

/// Failures to execute a tool.
///
/// A tool that runs and exits non-zero is *not* an error; the exit code is
/// reported on [`ProcessOutput`](crate::ProcessOutput).
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn process '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("Failed to write stdin of '{program}': {reason}")]
    StdinFailed { program: String, reason: String },

    #[error("Native execution failed: {reason}")]
    NativeExecutionFailed { reason: String },
}

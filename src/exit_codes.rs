//! Exit codes of the `lintwrap` binary and their mapping from errors

use lintwrap_config::ConfigError;

use crate::error::LintError;

/// Process exit code.
///
/// ```rust
/// use lintwrap::{ConfigError, ExitCode, LintError};
///
/// let err = LintError::Config(ConfigError::NoOutputStreams);
/// assert_eq!(ExitCode::from(&err), ExitCode::CONFIG);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - no findings were reported
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Findings - at least one finding was reported, or a prerequisite failed
    pub const FINDINGS: ExitCode = ExitCode(1);

    /// Configuration error - invalid arguments, definition file or settings
    pub const CONFIG: ExitCode = ExitCode(2);

    /// Runtime error - the tool could not run or its output could not be read
    pub const RUNTIME: ExitCode = ExitCode(3);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::CONFIG
    }
}

impl From<&LintError> for ExitCode {
    fn from(error: &LintError) -> Self {
        match error {
            LintError::Config(_) | LintError::WrongEntryPoint { .. } => ExitCode::CONFIG,
            LintError::Runner(_) | LintError::Hook(_) | LintError::Diff(_) | LintError::Io { .. } => {
                ExitCode::RUNTIME
            }
        }
    }
}

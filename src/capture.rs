//! Stream capture and classification
//!
//! Turns the raw [`ProcessOutput`] of one run into the text the interpreters
//! see. Streams that were produced but not requested are logged and dropped,
//! a nonzero exit is logged, and an empty result short-circuits
//! interpretation.

use std::borrow::Cow;

use lintwrap_config::ExecutionStrategy;
use lintwrap_runner::ProcessOutput;
use tracing::{info, warn};

/// Remove ANSI color, cursor and OSC sequences.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    console::strip_ansi_codes(text)
}

/// Captured text handed to an interpreter or to `process_output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// The only requested stream
    Single(String),
    /// Both streams, when stdout and stderr are requested
    Pair { stdout: String, stderr: String },
}

impl ToolOutput {
    /// Streams in capture order (stdout first).
    #[must_use]
    pub fn streams(&self) -> Vec<&str> {
        match self {
            Self::Single(text) => vec![text.as_str()],
            Self::Pair { stdout, stderr } => vec![stdout.as_str(), stderr.as_str()],
        }
    }
}

/// Result of one run, restricted to the requested streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CapturedOutput {
    /// Keep the streams `strategy` asks for.
    ///
    /// Unrequested non-empty streams and nonzero exits are logged as
    /// warnings; kept streams are ANSI-stripped when enabled.
    pub fn classify(strategy: &ExecutionStrategy, output: &ProcessOutput) -> Self {
        let linter = strategy.name.as_str();
        let stdout = select_stream(strategy, output.stdout_string(), strategy.use_stdout, "stdout");
        let stderr = select_stream(strategy, output.stderr_string(), strategy.use_stderr, "stderr");

        match output.exit_code {
            Some(0) => {}
            Some(code) => warn!(linter = %linter, "Exit code {code}"),
            None => warn!(linter = %linter, "Exit code unknown, process was terminated by a signal"),
        }

        Self {
            exit_code: output.exit_code,
            stdout,
            stderr,
        }
    }

    /// Whether any requested stream carries text.
    #[must_use]
    pub fn has_output(&self) -> bool {
        [&self.stdout, &self.stderr]
            .into_iter()
            .flatten()
            .any(|text| !text.is_empty())
    }

    /// Text for interpretation, `None` when nothing was printed.
    pub fn into_tool_output(self, linter: &str) -> Option<ToolOutput> {
        if !self.has_output() {
            info!(linter = %linter, "No output; skipping processing");
            return None;
        }
        match (self.stdout, self.stderr) {
            (Some(stdout), Some(stderr)) => Some(ToolOutput::Pair { stdout, stderr }),
            (Some(text), None) | (None, Some(text)) => Some(ToolOutput::Single(text)),
            (None, None) => None,
        }
    }
}

fn select_stream(
    strategy: &ExecutionStrategy,
    text: String,
    requested: bool,
    stream: &str,
) -> Option<String> {
    if !requested {
        if !text.is_empty() {
            warn!(linter = %strategy.name, "Discarded {stream}: {text}");
        }
        return None;
    }
    if strategy.strip_ansi {
        return Some(strip_ansi(&text).into_owned());
    }
    Some(text)
}

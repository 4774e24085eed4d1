//! Shared helpers for the lintwrap integration tests
#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lintwrap::{
    Capabilities, CommandSpec, HookCall, HookError, LintHandler, ProcessOutput, ProcessRunner,
    RunnerError,
};

// ============================================================================
// Log capture
// ============================================================================

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    /// Non-empty log lines; messages ending in a newline leave an empty one.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Run `f` with INFO-and-above events recorded, returning them line by line.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.lines())
}

// ============================================================================
// Runners and handlers
// ============================================================================

/// Runner returning fixed output and recording every command it was given.
pub struct CannedRunner {
    output: ProcessOutput,
    commands: Mutex<Vec<CommandSpec>>,
}

impl CannedRunner {
    pub fn new(stdout: &str, stderr: &str, exit_code: i32) -> Arc<Self> {
        Arc::new(Self {
            output: ProcessOutput::new(
                stdout.as_bytes().to_vec(),
                stderr.as_bytes().to_vec(),
                Some(exit_code),
            ),
            commands: Mutex::new(Vec::new()),
        })
    }

    pub fn stdout(text: &str) -> Arc<Self> {
        Self::new(text, "", 0)
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }
}

impl ProcessRunner for CannedRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, RunnerError> {
        self.commands.lock().unwrap().push(cmd.clone());
        Ok(self.output.clone())
    }
}

/// Handler passing the target's filename as the only argument.
pub struct FileArg {
    pub name: &'static str,
    pub capabilities: Capabilities,
}

impl FileArg {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            capabilities: Capabilities::default(),
        }
    }
}

impl LintHandler for FileArg {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create_arguments(
        &self,
        call: &HookCall<'_>,
        _config_file: Option<&Path>,
    ) -> Result<Option<Vec<String>>, HookError> {
        Ok(Some(call.target.filename().map(str::to_string).into_iter().collect()))
    }
}

/// Split text into lines keeping their endings.
pub fn lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

//! lintwrap - declarative adapters for external command-line linters
//!
//! An external tool is integrated by implementing [`LintHandler`] (mostly just
//! the argument vector) and declaring a handful of options; the adapter runs
//! the tool and turns whatever it prints into structured [`Finding`]s.
//!
//! lintwrap can be used in two ways:
//! - **Library**: wrap tools in Rust with [`Linter`]
//! - **CLI**: describe a tool in a TOML definition file and run `lintwrap run`
//!
//! # Output formats
//!
//! | `output_format` | Tool output is read as |
//! |-----------------|------------------------|
//! | unset (manual)  | anything; the handler's `process_output` interprets it |
//! | `regex`         | diagnostics matched by `output_regex`, one finding per match |
//! | `corrected`     | the complete corrected file, diffed against the original |
//! | `unified-diff`  | a unified diff against the original |
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Run a defined linter over two files, one JSON object per finding
//! lintwrap run --definition flake8.toml --json src/a.py src/b.py
//!
//! # Check that the wrapped tool is installed
//! lintwrap check --definition flake8.toml
//! ```
//!
//! # Stable Public API
//!
//! - [`Linter`], [`BoundLinter`], [`Findings`]: the adapter
//! - [`LintHandler`], [`HookCall`], [`Target`], [`Hook`]: the tool-hook contract
//! - [`LinterOptions`], [`Settings`], [`ParamSpec`]: configuration
//! - [`Finding`], [`Severity`], [`Diff`]: results
//! - [`LintError`], [`HookError`], [`ConfigError`]: errors
//! - [`ExitCode`]: CLI exit codes

pub mod adapter;
pub mod capture;
pub mod cli;
pub mod definition;
pub mod error;
pub mod exit_codes;
pub mod handler;
pub mod interpret;
pub mod logging;
mod prerequisite;

pub use adapter::{BoundLinter, Findings, Linter};
pub use capture::{CapturedOutput, ToolOutput, strip_ansi};
pub use error::{HookError, LintError};
pub use exit_codes::ExitCode;
pub use handler::{DependencyResults, Hook, HookCall, LintHandler, Target};
pub use prerequisite::PrerequisiteStatus;

pub use lintwrap_config::{
    Capabilities, ConfigError, ExecutionStrategy, HookParams, LinterOptions, OutputFormat,
    ParamSpec, Settings,
};
pub use lintwrap_diff::Diff;
pub use lintwrap_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
pub use lintwrap_types::{Finding, Severity};

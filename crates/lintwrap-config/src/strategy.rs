use std::collections::BTreeMap;

use lintwrap_types::Severity;
use regex::Regex;

use crate::format::OutputFormat;

/// Message of diff findings when no `result_message` is configured.
pub const DEFAULT_RESULT_MESSAGE: &str = "Inconsistency found.";

/// Merge distance of diff findings when no `diff_distance` is configured.
pub const DEFAULT_DIFF_DISTANCE: i64 = 1;

/// Failure text of a configured prerequisite command without its own message.
pub const DEFAULT_PREREQUISITE_FAIL_MESSAGE: &str = "Prerequisite check failed.";

/// Optional hooks a handler implements.
///
/// Declared once by the handler and cached on the strategy, so the adapter
/// never probes the handler at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create_arguments: bool,
    pub generate_config: bool,
    pub process_output: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            create_arguments: true,
            generate_config: false,
            process_output: false,
        }
    }
}

/// Line/column post-processing of regex matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Numbering {
    /// Tool reports 0-based lines
    pub normalize_line_numbers: bool,
    /// Tool reports 0-based columns
    pub normalize_column_numbers: bool,
    /// A final value of 0 means "unknown"
    pub remove_zero_numbers: bool,
}

impl Numbering {
    /// Apply normalization, then zero removal, to one raw line number.
    #[must_use]
    pub fn line(&self, raw: Option<i64>) -> Option<usize> {
        self.adjust(raw, self.normalize_line_numbers)
    }

    /// Apply normalization, then zero removal, to one raw column number.
    #[must_use]
    pub fn column(&self, raw: Option<i64>) -> Option<usize> {
        self.adjust(raw, self.normalize_column_numbers)
    }

    /// Values that overflow or stay negative are unknown.
    fn adjust(&self, raw: Option<i64>, normalize: bool) -> Option<usize> {
        let raw = raw?;
        let value = if normalize { raw.checked_add(1)? } else { raw };
        if self.remove_zero_numbers && value == 0 {
            return None;
        }
        usize::try_from(value).ok()
    }
}

/// Parameters of the regex interpreter.
#[derive(Debug, Clone)]
pub struct RegexOptions {
    pub regex: Regex,
    /// Lower-case tool labels to severities
    pub severity_map: BTreeMap<String, Severity>,
    /// Replaces the matched message of every finding when set
    pub result_message: Option<String>,
}

/// Parameters of the corrected-source and unified-diff interpreters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    pub severity: Severity,
    pub result_message: String,
    /// Unchanged lines allowed between changes of one finding; negative never merges
    pub distance: i64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            severity: Severity::Normal,
            result_message: DEFAULT_RESULT_MESSAGE.to_string(),
            distance: DEFAULT_DIFF_DISTANCE,
        }
    }
}

/// Interpreter selected by `output_format`, with its parameters.
#[derive(Debug, Clone)]
pub enum OutputStrategy {
    Manual,
    Regex(RegexOptions),
    Corrected(DiffOptions),
    UnifiedDiff(DiffOptions),
}

impl OutputStrategy {
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Manual => OutputFormat::Manual,
            Self::Regex(_) => OutputFormat::Regex,
            Self::Corrected(_) => OutputFormat::Corrected,
            Self::UnifiedDiff(_) => OutputFormat::UnifiedDiff,
        }
    }
}

/// Command deciding whether the wrapped tool is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteCheck {
    pub command: Vec<String>,
    pub fail_message: String,
}

/// Validated, immutable configuration of one linter.
///
/// Built by [`ExecutionStrategy::resolve`]; at least one of `use_stdout` and
/// `use_stderr` is always set, and `use_stdin` is never combined with
/// `global`.
#[derive(Debug, Clone)]
pub struct ExecutionStrategy {
    /// Handler name, used as the finding origin and in log records
    pub name: String,
    pub executable: String,
    pub use_stdin: bool,
    pub use_stdout: bool,
    pub use_stderr: bool,
    /// Run once per project instead of once per file
    pub global: bool,
    pub strip_ansi: bool,
    pub numbering: Numbering,
    /// Suffix of generated config files, e.g. `.toml`
    pub config_suffix: String,
    /// Remediation hint appended when the executable is missing
    pub executable_check_fail_info: String,
    pub prerequisite_check: Option<PrerequisiteCheck>,
    pub capabilities: Capabilities,
    pub output: OutputStrategy,
}

impl ExecutionStrategy {
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output.format()
    }
}

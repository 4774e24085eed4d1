use lintwrap_types::Severity;
use toml::{Table, Value};

use crate::format::OutputFormat;

/// Builder for the option table of a linter.
///
/// Produces the same [`Table`] a linter definition file would contain, so
/// programmatic and file-based linters go through identical validation.
///
/// # Example
///
/// ```rust
/// use lintwrap_config::{LinterOptions, OutputFormat};
/// use lintwrap_types::Severity;
///
/// let options = LinterOptions::new()
///     .use_stderr(true)
///     .output_format(OutputFormat::Regex)
///     .output_regex(r"(?P<line>\d+):(?P<message>.*)")
///     .severity_map([("E", Severity::Major)])
///     .build();
///
/// assert_eq!(options["output_format"].as_str(), Some("regex"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinterOptions {
    table: Table,
}

impl LinterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary option; unknown names are rejected at resolution.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.table.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn use_stdin(self, enabled: bool) -> Self {
        self.set("use_stdin", enabled)
    }

    #[must_use]
    pub fn use_stdout(self, enabled: bool) -> Self {
        self.set("use_stdout", enabled)
    }

    #[must_use]
    pub fn use_stderr(self, enabled: bool) -> Self {
        self.set("use_stderr", enabled)
    }

    /// Run once per project instead of once per file.
    #[must_use]
    pub fn global(self, enabled: bool) -> Self {
        self.set("global", enabled)
    }

    #[must_use]
    pub fn normalize_line_numbers(self, enabled: bool) -> Self {
        self.set("normalize_line_numbers", enabled)
    }

    #[must_use]
    pub fn normalize_column_numbers(self, enabled: bool) -> Self {
        self.set("normalize_column_numbers", enabled)
    }

    #[must_use]
    pub fn remove_zero_numbers(self, enabled: bool) -> Self {
        self.set("remove_zero_numbers", enabled)
    }

    #[must_use]
    pub fn strip_ansi(self, enabled: bool) -> Self {
        self.set("strip_ansi", enabled)
    }

    #[must_use]
    pub fn config_suffix(self, suffix: impl Into<String>) -> Self {
        self.set("config_suffix", suffix.into())
    }

    #[must_use]
    pub fn executable_check_fail_info(self, info: impl Into<String>) -> Self {
        self.set("executable_check_fail_info", info.into())
    }

    #[must_use]
    pub fn prerequisite_check_command<I, S>(self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command: Vec<Value> = command
            .into_iter()
            .map(|part| Value::String(part.into()))
            .collect();
        self.set("prerequisite_check_command", command)
    }

    #[must_use]
    pub fn prerequisite_check_fail_message(self, message: impl Into<String>) -> Self {
        self.set("prerequisite_check_fail_message", message.into())
    }

    /// Select a built-in interpreter; not calling this leaves the linter manual.
    #[must_use]
    pub fn output_format(self, format: OutputFormat) -> Self {
        self.set("output_format", format.as_str())
    }

    #[must_use]
    pub fn output_regex(self, pattern: impl Into<String>) -> Self {
        self.set("output_regex", pattern.into())
    }

    #[must_use]
    pub fn severity_map<I, K>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Severity)>,
        K: Into<String>,
    {
        let map: Table = entries
            .into_iter()
            .map(|(label, severity)| (label.into(), Value::String(severity.to_string())))
            .collect();
        self.set("severity_map", map)
    }

    #[must_use]
    pub fn result_message(self, message: impl Into<String>) -> Self {
        self.set("result_message", message.into())
    }

    #[must_use]
    pub fn diff_severity(self, severity: Severity) -> Self {
        self.set("diff_severity", severity.to_string())
    }

    #[must_use]
    pub fn diff_distance(self, distance: i64) -> Self {
        self.set("diff_distance", distance)
    }

    #[must_use]
    pub fn build(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_writes_option_table() {
        let table = LinterOptions::new()
            .use_stdin(true)
            .output_format(OutputFormat::UnifiedDiff)
            .diff_severity(Severity::Info)
            .diff_distance(-1)
            .prerequisite_check_command(["tool", "--version"])
            .build();

        assert_eq!(table["use_stdin"].as_bool(), Some(true));
        assert_eq!(table["output_format"].as_str(), Some("unified-diff"));
        assert_eq!(table["diff_severity"].as_str(), Some("INFO"));
        assert_eq!(table["diff_distance"].as_integer(), Some(-1));
        assert_eq!(
            table["prerequisite_check_command"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn test_severity_map_entries() {
        let table = LinterOptions::new()
            .severity_map([("E", Severity::Major), ("W", Severity::Normal)])
            .build();
        let map = table["severity_map"].as_table().unwrap();
        assert_eq!(map["E"].as_str(), Some("MAJOR"));
        assert_eq!(map["W"].as_str(), Some("NORMAL"));
    }
}

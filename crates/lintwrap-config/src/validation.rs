use std::collections::{BTreeMap, BTreeSet};

use lintwrap_types::{Severity, default_severity_map};
use regex::Regex;
use toml::{Table, Value};
use tracing::warn;

use crate::error::ConfigError;
use crate::format::OutputFormat;
use crate::strategy::{
    Capabilities, DEFAULT_DIFF_DISTANCE, DEFAULT_PREREQUISITE_FAIL_MESSAGE,
    DEFAULT_RESULT_MESSAGE, DiffOptions, ExecutionStrategy, Numbering, OutputStrategy,
    PrerequisiteCheck, RegexOptions,
};

/// Options accepted regardless of the output format.
const GENERAL_OPTIONS: &[&str] = &[
    "use_stdin",
    "use_stdout",
    "use_stderr",
    "global",
    "normalize_line_numbers",
    "normalize_column_numbers",
    "remove_zero_numbers",
    "strip_ansi",
    "config_suffix",
    "executable_check_fail_info",
    "prerequisite_check_command",
    "output_format",
];

const REGEX_OPTIONS: &[&str] = &["output_regex", "severity_map", "result_message"];

const DIFF_OPTIONS: &[&str] = &["result_message", "diff_severity", "diff_distance"];

/// Named groups the regex interpreter reads.
const SUPPORTED_GROUPS: &[&str] = &[
    "line",
    "column",
    "end_line",
    "end_column",
    "message",
    "severity",
    "origin",
    "additional_info",
    "filename",
];

impl ExecutionStrategy {
    /// Validate linter `options` into an execution strategy.
    ///
    /// `name` identifies the handler in errors and log records;
    /// `capabilities` are the hooks the handler implements.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lintwrap_config::{Capabilities, ExecutionStrategy, LinterOptions, OutputFormat};
    ///
    /// let options = LinterOptions::new()
    ///     .output_format(OutputFormat::Regex)
    ///     .output_regex(r"(?P<line>\d+): (?P<message>.*)")
    ///     .build();
    /// let strategy =
    ///     ExecutionStrategy::resolve("MyLint", "mylint", &options, Capabilities::default())
    ///         .unwrap();
    /// assert_eq!(strategy.output_format(), OutputFormat::Regex);
    /// ```
    pub fn resolve(
        name: &str,
        executable: &str,
        options: &Table,
        capabilities: Capabilities,
    ) -> Result<Self, ConfigError> {
        let reader = OptionReader { table: options };

        let format = match reader.string("output_format")? {
            Some(value) => OutputFormat::from_option(value)?,
            None => OutputFormat::Manual,
        };

        check_option_names(options, format)?;

        let use_stdin = reader.bool("use_stdin", false)?;
        let global = reader.bool("global", false)?;
        if use_stdin && global {
            return Err(ConfigError::IncompatibleOptions {
                first: "use_stdin",
                second: "global",
            });
        }

        if global && format.is_diff() {
            return Err(ConfigError::GlobalDiffFormat(format.to_string()));
        }

        let use_stdout = reader.bool("use_stdout", true)?;
        let use_stderr = reader.bool("use_stderr", false)?;
        if !use_stdout && !use_stderr {
            return Err(ConfigError::NoOutputStreams);
        }

        let numbering = Numbering {
            normalize_line_numbers: reader.bool("normalize_line_numbers", false)?,
            normalize_column_numbers: reader.bool("normalize_column_numbers", false)?,
            remove_zero_numbers: reader.bool("remove_zero_numbers", false)?,
        };

        let prerequisite_check = match reader.string_array("prerequisite_check_command")? {
            Some(command) => Some(PrerequisiteCheck {
                command,
                fail_message: reader
                    .string("prerequisite_check_fail_message")?
                    .unwrap_or(DEFAULT_PREREQUISITE_FAIL_MESSAGE)
                    .to_string(),
            }),
            None => None,
        };

        let output = match format {
            OutputFormat::Manual => OutputStrategy::Manual,
            OutputFormat::Regex => OutputStrategy::Regex(regex_options(name, &reader)?),
            OutputFormat::Corrected => OutputStrategy::Corrected(diff_options(&reader)?),
            OutputFormat::UnifiedDiff => OutputStrategy::UnifiedDiff(diff_options(&reader)?),
        };

        match (format.is_builtin(), capabilities.process_output) {
            (false, false) => return Err(ConfigError::MissingProcessOutput(name.to_string())),
            (true, true) => {
                return Err(ConfigError::ProcessOutputConflict {
                    handler: name.to_string(),
                    format: format.to_string(),
                });
            }
            _ => {}
        }

        Ok(Self {
            name: name.to_string(),
            executable: executable.to_string(),
            use_stdin,
            use_stdout,
            use_stderr,
            global,
            strip_ansi: reader.bool("strip_ansi", false)?,
            numbering,
            config_suffix: reader.string("config_suffix")?.unwrap_or_default().to_string(),
            executable_check_fail_info: reader
                .string("executable_check_fail_info")?
                .unwrap_or_default()
                .to_string(),
            prerequisite_check,
            capabilities,
            output,
        })
    }
}

/// Reject option names that are unknown or belong to another output format.
fn check_option_names(options: &Table, format: OutputFormat) -> Result<(), ConfigError> {
    let mut allowed: BTreeSet<&str> = GENERAL_OPTIONS.iter().copied().collect();
    match format {
        OutputFormat::Regex => allowed.extend(REGEX_OPTIONS),
        OutputFormat::Corrected | OutputFormat::UnifiedDiff => allowed.extend(DIFF_OPTIONS),
        OutputFormat::Manual => {}
    }
    if options.contains_key("prerequisite_check_command") {
        allowed.insert("prerequisite_check_fail_message");
    }

    let mut invalid: Vec<String> = options
        .keys()
        .filter(|key| !allowed.contains(key.as_str()))
        .cloned()
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    invalid.sort();
    Err(ConfigError::InvalidOptions(invalid))
}

fn regex_options(name: &str, reader: &OptionReader<'_>) -> Result<RegexOptions, ConfigError> {
    let pattern = reader
        .string("output_regex")?
        .ok_or(ConfigError::MissingOutputRegex)?;
    let regex = Regex::new(pattern).map_err(ConfigError::InvalidRegex)?;

    let severity_map = match reader.table.get("severity_map") {
        Some(value) => {
            if !regex.capture_names().flatten().any(|group| group == "severity") {
                return Err(ConfigError::SeverityGroupMissing);
            }
            severity_map(value)?
        }
        None => default_severity_map(),
    };

    let result_message = reader.string("result_message")?.map(str::to_string);

    warn_capture_groups(name, &regex);

    Ok(RegexOptions {
        regex,
        severity_map,
        result_message,
    })
}

fn diff_options(reader: &OptionReader<'_>) -> Result<DiffOptions, ConfigError> {
    let severity = match reader.table.get("diff_severity") {
        None => Severity::Normal,
        Some(Value::String(label)) => label
            .parse()
            .map_err(|_| ConfigError::InvalidDiffSeverity(label.clone()))?,
        Some(Value::Integer(level)) => Severity::from_level(*level)
            .ok_or_else(|| ConfigError::InvalidDiffSeverity(level.to_string()))?,
        Some(_) => {
            return Err(ConfigError::InvalidType {
                option: "diff_severity".to_string(),
                expected: "string, integer",
            });
        }
    };

    Ok(DiffOptions {
        severity,
        result_message: reader
            .string("result_message")?
            .unwrap_or(DEFAULT_RESULT_MESSAGE)
            .to_string(),
        distance: reader.integer("diff_distance")?.unwrap_or(DEFAULT_DIFF_DISTANCE),
    })
}

/// Parse a user severity map; keys are lower-cased for lookup.
fn severity_map(value: &Value) -> Result<BTreeMap<String, Severity>, ConfigError> {
    let table = value.as_table().ok_or_else(|| ConfigError::InvalidType {
        option: "severity_map".to_string(),
        expected: "table",
    })?;

    let mut map = BTreeMap::new();
    for (key, value) in table {
        let severity = match value {
            Value::String(label) => {
                label
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeverityName {
                        key: key.clone(),
                        value: label.clone(),
                    })?
            }
            Value::Integer(level) => {
                Severity::from_level(*level).ok_or_else(|| ConfigError::InvalidSeverityLevel {
                    key: key.clone(),
                    value: *level,
                })?
            }
            other => {
                return Err(ConfigError::InvalidSeverityName {
                    key: key.clone(),
                    value: other.to_string(),
                });
            }
        };
        map.insert(key.to_lowercase(), severity);
    }
    Ok(map)
}

fn warn_capture_groups(name: &str, regex: &Regex) {
    let groups: Vec<Option<&str>> = regex.capture_names().skip(1).collect();

    if groups.iter().any(Option::is_none) {
        warn!(
            linter = %name,
            "Using unnecessary capturing groups affects matching performance. \
             You should use '(?:<pattern>)' instead of '(<pattern>)' for your regex."
        );
    }

    for group in groups
        .into_iter()
        .flatten()
        .filter(|group| !SUPPORTED_GROUPS.contains(group))
    {
        warn!(
            linter = %name,
            "Superfluous capturing group '{group}' used. Is this a typo? If not, \
             consider removing the capturing group to improve matching performance."
        );
    }
}

/// Typed access to the raw option table.
struct OptionReader<'a> {
    table: &'a Table,
}

impl<'a> OptionReader<'a> {
    fn bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.table.get(key) {
            None => Ok(default),
            Some(Value::Boolean(value)) => Ok(*value),
            Some(_) => Err(type_error(key, "bool")),
        }
    }

    fn string(&self, key: &str) -> Result<Option<&'a str>, ConfigError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(type_error(key, "string")),
        }
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::Integer(value)) => Ok(Some(*value)),
            Some(_) => Err(type_error(key, "integer")),
        }
    }

    /// Non-empty array of strings.
    fn string_array(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.table.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .filter(|items| !items.is_empty())
            .ok_or_else(|| type_error(key, "non-empty array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_error(key, "non-empty array of strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn type_error(option: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidType {
        option: option.to_string(),
        expected,
    }
}

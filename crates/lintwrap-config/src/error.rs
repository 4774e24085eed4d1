//! Error types for linter definitions and settings

use thiserror::Error;

/// Errors raised while validating linter options or resolving hook settings.
///
/// Option errors are raised at definition time and are fatal for that linter.
/// Setting errors (`MissingSetting`, `InvalidSetting`) surface when a hook is
/// about to be called.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid keyword arguments provided: {}", quote_list(.0))]
    InvalidOptions(Vec<String>),

    #[error("Incompatible arguments provided: '{first}' and '{second}' can't both be True.")]
    IncompatibleOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("'{0}' output-format needs file content and can't be used with 'global'.")]
    GlobalDiffFormat(String),

    #[error("No output streams provided at all.")]
    NoOutputStreams,

    #[error("Invalid `output_format` specified.")]
    InvalidOutputFormat(String),

    #[error("`output_regex` needed when specified output-format 'regex'.")]
    MissingOutputRegex,

    #[error("Invalid `output_regex`: {0}")]
    InvalidRegex(#[source] regex::Error),

    #[error("Provided `severity_map` but named group `severity` is not used in `output_regex`.")]
    SeverityGroupMissing,

    #[error("`{option}` must be an instance of one of ({expected})")]
    InvalidType {
        option: String,
        expected: &'static str,
    },

    #[error(
        "The value '{value}' for key '{key}' inside given severity-map is no valid severity value."
    )]
    InvalidSeverityName { key: String, value: String },

    #[error("Invalid severity value {value} for key '{key}' inside given severity-map.")]
    InvalidSeverityLevel { key: String, value: i64 },

    #[error("Invalid value for `diff_severity`: {0}")]
    InvalidDiffSeverity(String),

    #[error("`process_output` not provided by given handler '{0}'.")]
    MissingProcessOutput(String),

    #[error(
        "Found `process_output` already defined by handler '{handler}', but '{format}' output-format is specified."
    )]
    ProcessOutputConflict { handler: String, format: String },

    #[error("Missing required setting '{0}'")]
    MissingSetting(String),

    #[error("Invalid value '{value}' for setting '{name}': {reason}")]
    InvalidSetting {
        name: String,
        value: String,
        reason: String,
    },
}

fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

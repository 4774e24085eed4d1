use std::fmt;

use crate::error::ConfigError;

/// How the captured tool output is turned into findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// The handler interprets the output itself
    #[default]
    Manual,
    /// Every match of `output_regex` is one finding
    Regex,
    /// The output is the corrected file content
    Corrected,
    /// The output is a unified diff against the file
    UnifiedDiff,
}

impl OutputFormat {
    /// Name used in linter options (`output_format = "..."`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Regex => "regex",
            Self::Corrected => "corrected",
            Self::UnifiedDiff => "unified-diff",
        }
    }

    /// Parse the `output_format` option value.
    ///
    /// `manual` is not a value users write: leaving the option out selects it.
    pub fn from_option(value: &str) -> Result<Self, ConfigError> {
        match value {
            "regex" => Ok(Self::Regex),
            "corrected" => Ok(Self::Corrected),
            "unified-diff" => Ok(Self::UnifiedDiff),
            other => Err(ConfigError::InvalidOutputFormat(other.to_string())),
        }
    }

    /// Whether findings come from a built-in interpreter.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Manual)
    }

    /// Whether output is interpreted as a diff against the file.
    #[must_use]
    pub const fn is_diff(&self) -> bool {
        matches!(self, Self::Corrected | Self::UnifiedDiff)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::collections::BTreeMap;
use std::fmt;

use lintwrap_diff::Diff;
use serde::{Serialize, Serializer};

use crate::Severity;

/// One issue reported by a wrapped tool.
///
/// Every position field is independently optional; `None` means the tool did
/// not report (or reported an unusable value for) that coordinate. Lines and
/// columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Label of the producing tool, e.g. `PyLint` or `PyLint (C0301)`
    pub origin: String,
    pub message: String,
    pub severity: Severity,
    pub file: Option<String>,
    pub start_line: Option<usize>,
    pub start_column: Option<usize>,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    /// Suggested changes keyed by filename, rendered as unified diffs when serialized
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        serialize_with = "serialize_diffs"
    )]
    pub diffs: BTreeMap<String, Diff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Finding {
    /// Create a finding without position or diff.
    #[must_use]
    pub fn new(origin: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            origin: origin.into(),
            message: message.into(),
            severity,
            file: None,
            start_line: None,
            start_column: None,
            end_line: None,
            end_column: None,
            diffs: BTreeMap::new(),
            additional_info: None,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the start and end position in one go.
    #[must_use]
    pub fn with_position(
        mut self,
        start_line: Option<usize>,
        start_column: Option<usize>,
        end_line: Option<usize>,
        end_column: Option<usize>,
    ) -> Self {
        self.start_line = start_line;
        self.start_column = start_column;
        self.end_line = end_line;
        self.end_column = end_column;
        self
    }

    #[must_use]
    pub fn with_diff(mut self, filename: impl Into<String>, diff: Diff) -> Self {
        self.diffs.insert(filename.into(), diff);
        self
    }

    #[must_use]
    pub fn with_additional_info(mut self, info: Option<String>) -> Self {
        self.additional_info = info;
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
            if let Some(line) = self.start_line {
                write!(f, "{line}:")?;
                if let Some(column) = self.start_column {
                    write!(f, "{column}:")?;
                }
            }
            write!(f, " ")?;
        }
        write!(f, "{} [{}] {}", self.severity, self.origin, self.message)
    }
}

fn serialize_diffs<S: Serializer>(
    diffs: &BTreeMap<String, Diff>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        diffs
            .iter()
            .map(|(filename, diff)| (filename, diff.unified_diff(filename))),
    )
}

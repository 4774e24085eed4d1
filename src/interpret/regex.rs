use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use lintwrap_config::{Numbering, RegexOptions};
use lintwrap_types::{Finding, Severity};
use regex::Captures;
use tracing::warn;

/// Severity labels already reported as unknown, per linter instance.
#[derive(Debug, Default)]
pub struct SeverityWarnings {
    warned: Mutex<HashSet<String>>,
}

impl SeverityWarnings {
    /// Log the fallback for `label` unless it was logged before.
    pub fn warn_once(&self, linter: &str, label: &str) {
        let mut warned = self.warned.lock().unwrap_or_else(PoisonError::into_inner);
        if warned.insert(label.to_string()) {
            warn!(
                linter = %linter,
                "'{label}' not found in severity-map. Assuming `{}`.",
                Severity::Normal
            );
        }
    }
}

/// Reads findings out of tool output with the configured pattern.
#[derive(Debug, Clone, Copy)]
pub struct RegexInterpreter<'a> {
    name: &'a str,
    options: &'a RegexOptions,
    numbering: Numbering,
    /// Used for matches without a `filename` group
    filename: Option<&'a str>,
    warnings: &'a SeverityWarnings,
}

impl<'a> RegexInterpreter<'a> {
    #[must_use]
    pub fn new(
        name: &'a str,
        options: &'a RegexOptions,
        numbering: Numbering,
        filename: Option<&'a str>,
        warnings: &'a SeverityWarnings,
    ) -> Self {
        Self {
            name,
            options,
            numbering,
            filename,
            warnings,
        }
    }

    /// One finding per non-overlapping match, in match order.
    pub fn findings(self, text: &'a str) -> impl Iterator<Item = Finding> + 'a {
        self.options
            .regex
            .captures_iter(text)
            .map(move |captures| self.finding(&captures))
    }

    fn finding(&self, captures: &Captures<'_>) -> Finding {
        let group = |name: &str| captures.name(name).map(|m| m.as_str());
        let number = |name: &str| group(name).and_then(|text| text.trim().parse::<i64>().ok());

        let severity = match group("severity") {
            Some(label) => self.severity(label),
            None => Severity::default(),
        };
        let origin = match group("origin") {
            Some(origin) => format!("{} ({origin})", self.name),
            None => self.name.to_string(),
        };
        let message = match &self.options.result_message {
            Some(message) => message.clone(),
            None => group("message").unwrap_or_default().to_string(),
        };

        let mut finding = Finding::new(origin, message, severity)
            .with_position(
                self.numbering.line(number("line")),
                self.numbering.column(number("column")),
                self.numbering.line(number("end_line")),
                self.numbering.column(number("end_column")),
            )
            .with_additional_info(group("additional_info").map(str::to_string));
        if let Some(file) = group("filename").or(self.filename) {
            finding = finding.with_file(file);
        }
        finding
    }

    fn severity(&self, label: &str) -> Severity {
        match self.options.severity_map.get(&label.to_lowercase()) {
            Some(severity) => *severity,
            None => {
                self.warnings.warn_once(self.name, label);
                Severity::default()
            }
        }
    }
}

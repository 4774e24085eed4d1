//! The tool-hook contract
//!
//! A [`LintHandler`] describes one external tool: how to build its argument
//! vector, optionally how to generate a config file for it, and, for linters
//! without a built-in output format, how to read its output. The adapter
//! ([`crate::Linter`]) supplies everything else.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use lintwrap_config::{Capabilities, HookParams, ParamSpec};
use lintwrap_types::Finding;

use crate::capture::ToolOutput;
use crate::error::HookError;

/// Findings of linters a run depends on, keyed by linter name.
pub type DependencyResults = BTreeMap<String, Vec<Finding>>;

/// Hook of a [`LintHandler`] that can declare extra parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Hook {
    CreateArguments,
    GenerateConfig,
    ProcessOutput,
}

impl Hook {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateArguments => "create_arguments",
            Self::GenerateConfig => "generate_config",
            Self::ProcessOutput => "process_output",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one invocation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A single file and its content, lines keeping their endings
    File {
        filename: &'a str,
        lines: &'a [String],
    },
    /// The whole project (global linters)
    Project,
}

impl<'a> Target<'a> {
    #[must_use]
    pub fn filename(&self) -> Option<&'a str> {
        match *self {
            Self::File { filename, .. } => Some(filename),
            Self::Project => None,
        }
    }

    /// File content; empty for project targets.
    #[must_use]
    pub fn lines(&self) -> &'a [String] {
        match *self {
            Self::File { lines, .. } => lines,
            Self::Project => &[],
        }
    }
}

/// Arguments of one hook invocation.
#[derive(Debug, Clone, Copy)]
pub struct HookCall<'a> {
    pub target: Target<'a>,
    /// Values of the extra parameters the hook declared
    pub params: &'a HookParams,
    pub dependency_results: &'a DependencyResults,
}

/// Implemented once per wrapped tool.
///
/// Only [`LintHandler::name`] is required. `create_arguments` has to be
/// provided for the linter to run at all; without it every invocation fails
/// with [`HookError::NotImplemented`]. Implementations of the optional
/// hooks must be announced through [`LintHandler::capabilities`], which the
/// adapter reads once when the linter is defined.
pub trait LintHandler: Send + Sync {
    /// Label used as finding origin and in log records.
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Extra parameters `hook` takes from the settings.
    fn params(&self, _hook: Hook) -> Vec<ParamSpec> {
        Vec::new()
    }

    /// Directory the tool runs in; `None` keeps the current directory.
    fn working_dir(&self, _target: &Target<'_>) -> Option<PathBuf> {
        None
    }

    /// Variables added to the tool's environment.
    fn environment(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Argument vector for one run, without the executable.
    ///
    /// `Ok(None)` skips the run: no process is started and no findings are
    /// produced.
    fn create_arguments(
        &self,
        _call: &HookCall<'_>,
        _config_file: Option<&Path>,
    ) -> Result<Option<Vec<String>>, HookError> {
        Err(HookError::NotImplemented {
            handler: self.name().to_string(),
            hook: Hook::CreateArguments.as_str(),
        })
    }

    /// Content of a config file for the tool, `None` for no file.
    fn generate_config(&self, _call: &HookCall<'_>) -> Result<Option<String>, HookError> {
        Ok(None)
    }

    /// Turn captured output into findings (manual output format).
    fn process_output(
        &self,
        _output: &ToolOutput,
        _call: &HookCall<'_>,
    ) -> Result<Vec<Finding>, HookError> {
        Err(HookError::NotImplemented {
            handler: self.name().to_string(),
            hook: Hook::ProcessOutput.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl LintHandler for Bare {
        fn name(&self) -> &str {
            "Bare"
        }
    }

    #[test]
    fn test_default_hooks() {
        let params = HookParams::default();
        let deps = DependencyResults::new();
        let call = HookCall {
            target: Target::Project,
            params: &params,
            dependency_results: &deps,
        };

        assert!(matches!(
            Bare.create_arguments(&call, None),
            Err(HookError::NotImplemented { hook: "create_arguments", .. })
        ));
        assert_eq!(Bare.generate_config(&call).unwrap(), None);
        assert!(Bare.params(Hook::CreateArguments).is_empty());
        assert_eq!(Bare.working_dir(&call.target), None);
    }

    #[test]
    fn test_target_accessors() {
        let lines = vec!["a\n".to_string()];
        let file = Target::File {
            filename: "f.txt",
            lines: &lines,
        };
        assert_eq!(file.filename(), Some("f.txt"));
        assert_eq!(file.lines().len(), 1);
        assert_eq!(Target::Project.filename(), None);
        assert!(Target::Project.lines().is_empty());
    }
}

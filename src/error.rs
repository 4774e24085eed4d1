//! Error types of the adapter façade

use std::io;

use lintwrap_config::ConfigError;
use lintwrap_diff::DiffError;
use lintwrap_runner::RunnerError;
use thiserror::Error;

/// Failure signalled by a handler hook.
#[derive(Error, Debug)]
pub enum HookError {
    /// The hook is mandatory for this invocation but the handler does not provide it
    #[error("`{hook}` is not implemented by handler '{handler}'")]
    NotImplemented {
        handler: String,
        hook: &'static str,
    },

    #[error("`{hook}` failed: {reason}")]
    Failed { hook: &'static str, reason: String },
}

impl HookError {
    /// Shorthand for handlers reporting a failed hook.
    pub fn failed(hook: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed {
            hook,
            reason: reason.into(),
        }
    }
}

/// Errors raised while defining or running a linter.
#[derive(Error, Debug)]
pub enum LintError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Hook(#[from] HookError),

    /// Tool output could not be read as a diff of the original file
    #[error("Malformed diff output: {0}")]
    Diff(#[from] DiffError),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Per-file linter run globally, or the other way round
    #[error("Linter '{linter}' is {mode}; use `{entry_point}` instead")]
    WrongEntryPoint {
        linter: String,
        mode: &'static str,
        entry_point: &'static str,
    },
}

impl LintError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_names_hook_and_handler() {
        let err = HookError::NotImplemented {
            handler: "Dummy".to_string(),
            hook: "create_arguments",
        };
        assert_eq!(
            err.to_string(),
            "`create_arguments` is not implemented by handler 'Dummy'"
        );
    }

    #[test]
    fn test_config_errors_pass_through_unchanged() {
        let err = LintError::from(ConfigError::NoOutputStreams);
        assert_eq!(err.to_string(), "No output streams provided at all.");
    }
}

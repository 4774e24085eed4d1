//! The adapter façade
//!
//! A [`Linter`] pairs a [`LintHandler`] with the [`ExecutionStrategy`]
//! validated from its options. Binding it to a settings bag gives a
//! [`BoundLinter`], whose `run_file`/`run_global` perform one invocation:
//!
//! ```text
//! generate_config ─▶ temp file ─▶ create_arguments ─▶ process ─▶ capture ─▶ interpret
//! ```
//!
//! The generated config file lives exactly as long as the invocation and is
//! removed on every exit path.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use lintwrap_config::{
    ConfigError, ExecutionStrategy, HookParams, OutputFormat, OutputStrategy, ParamSpec, Settings,
};
use lintwrap_runner::{CommandSpec, NativeRunner, ProcessRunner};
use lintwrap_types::Finding;
use tempfile::NamedTempFile;
use toml::Table;
use tracing::debug;

use crate::capture::{CapturedOutput, ToolOutput};
use crate::error::{HookError, LintError};
use crate::handler::{DependencyResults, Hook, HookCall, LintHandler, Target};
use crate::interpret::{self, RegexInterpreter, SeverityWarnings};
use crate::prerequisite::{self, PrerequisiteStatus};

// ============================================================================
// Findings - result sequence of one invocation
// ============================================================================

/// Findings of one invocation, in production order.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    inner: std::vec::IntoIter<Finding>,
}

impl From<Vec<Finding>> for Findings {
    fn from(findings: Vec<Finding>) -> Self {
        Self {
            inner: findings.into_iter(),
        }
    }
}

impl Iterator for Findings {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Findings {}

// ============================================================================
// Linter - validated adapter definition
// ============================================================================

/// A wrapped tool: handler plus validated execution strategy.
///
/// # Example
///
/// ```rust,no_run
/// use lintwrap::{HookCall, HookError, LintHandler, Linter, LinterOptions, OutputFormat, Settings};
/// use std::path::Path;
///
/// struct Flake;
///
/// impl LintHandler for Flake {
///     fn name(&self) -> &str {
///         "Flake"
///     }
///
///     fn create_arguments(
///         &self,
///         call: &HookCall<'_>,
///         _config: Option<&Path>,
///     ) -> Result<Option<Vec<String>>, HookError> {
///         Ok(call.target.filename().map(|f| vec![f.to_string()]))
///     }
/// }
///
/// let options = LinterOptions::new()
///     .output_format(OutputFormat::Regex)
///     .output_regex(r"(?P<line>\d+):(?P<column>\d+): (?P<message>.*)")
///     .build();
/// let linter = Linter::new("flake8", Flake, &options)?;
/// let lines = vec!["import os\n".to_string()];
/// for finding in linter.bind(Settings::new()).run_file("a.py", &lines)? {
///     println!("{finding}");
/// }
/// # Ok::<(), lintwrap::LintError>(())
/// ```
pub struct Linter<H> {
    handler: H,
    strategy: ExecutionStrategy,
    runner: Arc<dyn ProcessRunner>,
    severity_warnings: SeverityWarnings,
}

impl<H: LintHandler> Linter<H> {
    /// Validate `options` for `handler`; fails on any inconsistent option.
    pub fn new(
        executable: impl Into<String>,
        handler: H,
        options: &Table,
    ) -> Result<Self, ConfigError> {
        let executable = executable.into();
        let strategy = ExecutionStrategy::resolve(
            handler.name(),
            &executable,
            options,
            handler.capabilities(),
        )?;
        debug!(
            linter = %strategy.name,
            executable = %strategy.executable,
            output_format = %strategy.output_format(),
            "Linter defined"
        );

        Ok(Self {
            handler,
            strategy,
            runner: Arc::new(NativeRunner::new()),
            severity_warnings: SeverityWarnings::default(),
        })
    }

    /// Replace the process runner, e.g. with one returning canned output.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.strategy.name
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.strategy.executable
    }

    #[must_use]
    pub fn strategy(&self) -> &ExecutionStrategy {
        &self.strategy
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Check whether the wrapped tool can run.
    #[must_use]
    pub fn check_prerequisites(&self) -> PrerequisiteStatus {
        prerequisite::check(&self.strategy, self.runner.as_ref())
    }

    /// Settings that must be present for every hook to be callable.
    #[must_use]
    pub fn non_optional_settings(&self) -> Vec<ParamSpec> {
        self.declared_params()
            .into_values()
            .filter(ParamSpec::is_required)
            .collect()
    }

    /// Settings that fall back to a default, with that default.
    #[must_use]
    pub fn optional_settings(&self) -> Vec<ParamSpec> {
        self.declared_params()
            .into_values()
            .filter(|spec| !spec.is_required())
            .collect()
    }

    /// Attach a settings bag for running.
    #[must_use]
    pub fn bind(&self, settings: Settings) -> BoundLinter<'_, H> {
        BoundLinter {
            linter: self,
            settings,
            dependency_results: DependencyResults::new(),
        }
    }

    /// Hooks that are called during an invocation.
    fn active_hooks(&self) -> Vec<Hook> {
        let mut hooks = vec![Hook::CreateArguments];
        if self.strategy.capabilities.generate_config {
            hooks.push(Hook::GenerateConfig);
        }
        if self.strategy.output_format() == OutputFormat::Manual {
            hooks.push(Hook::ProcessOutput);
        }
        hooks
    }

    /// Parameters of all active hooks by name; the first declaration wins.
    fn declared_params(&self) -> BTreeMap<String, ParamSpec> {
        let mut params = BTreeMap::new();
        for hook in self.active_hooks() {
            for spec in self.handler.params(hook) {
                params.entry(spec.name.clone()).or_insert(spec);
            }
        }
        params
    }

    fn interpret(&self, output: &ToolOutput, call: &HookCall<'_>) -> Result<Vec<Finding>, LintError> {
        let name = self.strategy.name.as_str();
        let target = call.target;
        let filename = target.filename().unwrap_or_default();

        match &self.strategy.output {
            OutputStrategy::Manual => Ok(self.handler.process_output(output, call)?),
            OutputStrategy::Regex(options) => {
                let interpreter = RegexInterpreter::new(
                    name,
                    options,
                    self.strategy.numbering,
                    target.filename(),
                    &self.severity_warnings,
                );
                Ok(output
                    .streams()
                    .into_iter()
                    .flat_map(|text| interpreter.findings(text))
                    .collect())
            }
            OutputStrategy::Corrected(options) => Ok(output
                .streams()
                .into_iter()
                .flat_map(|text| {
                    interpret::corrected::findings(name, options, filename, target.lines(), text)
                })
                .collect()),
            OutputStrategy::UnifiedDiff(options) => {
                let mut findings = Vec::new();
                for text in output.streams() {
                    findings.extend(interpret::unified::findings(
                        name,
                        options,
                        filename,
                        target.lines(),
                        text,
                    )?);
                }
                Ok(findings)
            }
        }
    }
}

impl<H> fmt::Debug for Linter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} linter (wrapping '{}')>",
            self.strategy.name, self.strategy.executable
        )
    }
}

// ============================================================================
// BoundLinter - linter attached to settings
// ============================================================================

/// A linter bound to the settings of one run context.
pub struct BoundLinter<'l, H> {
    linter: &'l Linter<H>,
    settings: Settings,
    dependency_results: DependencyResults,
}

impl<'l, H: LintHandler> BoundLinter<'l, H> {
    /// Findings of other linters, visible to every hook.
    #[must_use]
    pub fn with_dependency_results(mut self, results: DependencyResults) -> Self {
        self.dependency_results = results;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run against one file; `lines` keep their line endings.
    pub fn run_file(&self, filename: &str, lines: &[String]) -> Result<Findings, LintError> {
        if self.linter.strategy.global {
            return Err(LintError::WrongEntryPoint {
                linter: self.linter.strategy.name.clone(),
                mode: "global",
                entry_point: "run_global",
            });
        }
        self.execute(Target::File { filename, lines })
    }

    /// Run once for the whole project.
    pub fn run_global(&self) -> Result<Findings, LintError> {
        if !self.linter.strategy.global {
            return Err(LintError::WrongEntryPoint {
                linter: self.linter.strategy.name.clone(),
                mode: "per-file",
                entry_point: "run_file",
            });
        }
        self.execute(Target::Project)
    }

    /// Interpret already captured output as if `target` had just been run.
    pub fn interpret(&self, output: &ToolOutput, target: Target<'_>) -> Result<Findings, LintError> {
        let params = self.params(Hook::ProcessOutput)?;
        let call = HookCall {
            target,
            params: &params,
            dependency_results: &self.dependency_results,
        };
        Ok(self.linter.interpret(output, &call)?.into())
    }

    fn params(&self, hook: Hook) -> Result<HookParams, ConfigError> {
        if !self.linter.active_hooks().contains(&hook) {
            return Ok(HookParams::default());
        }
        HookParams::resolve(&self.linter.handler.params(hook), &self.settings)
    }

    fn execute(&self, target: Target<'_>) -> Result<Findings, LintError> {
        let linter = self.linter;
        let strategy = &linter.strategy;
        let name = strategy.name.as_str();

        // Removed when dropped, on every return path below
        let config_file = self.generate_config(target)?;

        if !strategy.capabilities.create_arguments {
            return Err(HookError::NotImplemented {
                handler: name.to_string(),
                hook: Hook::CreateArguments.as_str(),
            }
            .into());
        }
        let params = self.params(Hook::CreateArguments)?;
        let call = HookCall {
            target,
            params: &params,
            dependency_results: &self.dependency_results,
        };
        let config_path = config_file.as_ref().map(NamedTempFile::path);
        let Some(arguments) = linter.handler.create_arguments(&call, config_path)? else {
            debug!(linter = %name, "No arguments created; skipping run");
            return Ok(Findings::default());
        };

        let mut command = CommandSpec::new(&strategy.executable)
            .args(&arguments)
            .envs(linter.handler.environment());
        if let Some(dir) = linter.handler.working_dir(&target) {
            command = command.cwd(dir);
        }
        if strategy.use_stdin {
            command = command.stdin(target.lines().concat());
        }

        debug!(linter = %name, ?arguments, "Running linter");
        let output = linter.runner.run(&command)?;
        let Some(output) = CapturedOutput::classify(strategy, &output).into_tool_output(name) else {
            return Ok(Findings::default());
        };

        self.interpret(&output, target)
    }

    fn generate_config(&self, target: Target<'_>) -> Result<Option<NamedTempFile>, LintError> {
        let strategy = &self.linter.strategy;
        if !strategy.capabilities.generate_config {
            return Ok(None);
        }

        let params = self.params(Hook::GenerateConfig)?;
        let call = HookCall {
            target,
            params: &params,
            dependency_results: &self.dependency_results,
        };
        let Some(content) = self.linter.handler.generate_config(&call)? else {
            return Ok(None);
        };

        let mut file = tempfile::Builder::new()
            .prefix("lintwrap-")
            .suffix(&strategy.config_suffix)
            .tempfile()
            .map_err(|e| LintError::io("creating the config file", e))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| LintError::io("writing the config file", e))?;
        debug!(linter = %strategy.name, path = %file.path().display(), "Generated config file");

        Ok(Some(file))
    }
}

impl<H> fmt::Debug for BoundLinter<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} linter object (wrapping '{}')>",
            self.linter.strategy.name, self.linter.strategy.executable
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use lintwrap_config::{Capabilities, LinterOptions};
    use lintwrap_runner::{ProcessOutput, RunnerError};
    use lintwrap_types::Severity;

    use super::*;

    /// Runner returning fixed output without spawning anything.
    struct Canned(ProcessOutput);

    impl ProcessRunner for Canned {
        fn run(&self, _cmd: &CommandSpec) -> Result<ProcessOutput, RunnerError> {
            Ok(self.0.clone())
        }
    }

    struct Echo;

    impl LintHandler for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn create_arguments(
            &self,
            call: &HookCall<'_>,
            _config_file: Option<&Path>,
        ) -> Result<Option<Vec<String>>, HookError> {
            Ok(call.target.filename().map(|f| vec![f.to_string()]))
        }
    }

    fn canned(stdout: &str) -> Arc<dyn ProcessRunner> {
        Arc::new(Canned(ProcessOutput::new(
            stdout.as_bytes().to_vec(),
            Vec::new(),
            Some(0),
        )))
    }

    #[test]
    fn test_debug_names_handler_and_executable() {
        let options = LinterOptions::new()
            .output_format(OutputFormat::Regex)
            .output_regex("x")
            .build();
        let linter = Linter::new("echo", Echo, &options).unwrap();
        assert_eq!(format!("{linter:?}"), "<Echo linter (wrapping 'echo')>");
        assert_eq!(
            format!("{:?}", linter.bind(Settings::new())),
            "<Echo linter object (wrapping 'echo')>"
        );
    }

    #[test]
    fn test_run_file_with_canned_output() {
        let options = LinterOptions::new()
            .output_format(OutputFormat::Regex)
            .output_regex(r"(?P<line>\d+): (?P<severity>\w+): (?P<message>.*)")
            .build();
        let linter = Linter::new("echo", Echo, &options)
            .unwrap()
            .with_runner(canned("2: warning: trailing space\n"));

        let lines = vec!["a\n".to_string(), "b \n".to_string()];
        let findings: Vec<_> = linter
            .bind(Settings::new())
            .run_file("f.txt", &lines)
            .unwrap()
            .collect();

        assert_eq!(
            findings,
            vec![
                Finding::new("Echo", "trailing space", Severity::Normal)
                    .with_file("f.txt")
                    .with_position(Some(2), None, None, None)
            ]
        );
    }

    #[test]
    fn test_entry_point_must_match_mode() {
        let options = LinterOptions::new()
            .output_format(OutputFormat::Regex)
            .output_regex("x")
            .build();
        let linter = Linter::new("echo", Echo, &options).unwrap();
        let err = linter.bind(Settings::new()).run_global().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Linter 'Echo' is per-file; use `run_file` instead"
        );
    }

    #[test]
    fn test_missing_create_arguments_fails_at_call_time() {
        struct NoArgs;

        impl LintHandler for NoArgs {
            fn name(&self) -> &str {
                "NoArgs"
            }

            fn capabilities(&self) -> Capabilities {
                Capabilities {
                    create_arguments: false,
                    ..Capabilities::default()
                }
            }
        }

        let options = LinterOptions::new()
            .output_format(OutputFormat::Corrected)
            .build();
        let linter = Linter::new("noargs", NoArgs, &options).unwrap();
        let err = linter
            .bind(Settings::new())
            .run_file("f", &[])
            .unwrap_err();
        assert!(matches!(
            err,
            LintError::Hook(HookError::NotImplemented {
                hook: "create_arguments",
                ..
            })
        ));
    }
}

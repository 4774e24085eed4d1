//! Availability check of the wrapped tool

use lintwrap_config::ExecutionStrategy;
use lintwrap_runner::{CommandSpec, ProcessRunner};
use tracing::debug;

/// Outcome of a prerequisite check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteStatus {
    Satisfied,
    /// Human-readable reason, including any remediation hint
    Failed(String),
}

impl PrerequisiteStatus {
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Run the configured check command, or look the executable up on `PATH`.
///
/// Never fails; spawn errors of the check command count as a failed check.
pub(crate) fn check(strategy: &ExecutionStrategy, runner: &dyn ProcessRunner) -> PrerequisiteStatus {
    let Some(check) = &strategy.prerequisite_check else {
        return check_executable(strategy);
    };
    let Some((program, args)) = check.command.split_first() else {
        return PrerequisiteStatus::Failed(check.fail_message.clone());
    };

    match runner.run(&CommandSpec::new(program).args(args)) {
        Ok(output) if output.success() => PrerequisiteStatus::Satisfied,
        Ok(output) => {
            debug!(linter = %strategy.name, exit_code = ?output.exit_code, "Prerequisite command failed");
            PrerequisiteStatus::Failed(check.fail_message.clone())
        }
        Err(e) => {
            debug!(linter = %strategy.name, error = %e, "Prerequisite command could not run");
            PrerequisiteStatus::Failed(check.fail_message.clone())
        }
    }
}

fn check_executable(strategy: &ExecutionStrategy) -> PrerequisiteStatus {
    match which::which(&strategy.executable) {
        Ok(path) => {
            debug!(linter = %strategy.name, path = %path.display(), "Executable found");
            PrerequisiteStatus::Satisfied
        }
        Err(_) => {
            let mut message = format!("'{}' is not installed.", strategy.executable);
            if !strategy.executable_check_fail_info.is_empty() {
                message.push(' ');
                message.push_str(&strategy.executable_check_fail_info);
            }
            PrerequisiteStatus::Failed(message)
        }
    }
}

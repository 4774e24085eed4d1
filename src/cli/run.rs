//! CLI entry point and dispatch logic
//!
//! `run()` parses arguments, installs logging, dispatches the subcommand and
//! prints every error itself; `main.rs` only turns the result into a process
//! exit code.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use super::args::{Cli, Commands};
use crate::adapter::Findings;
use crate::definition::{DefinedLinter, DefinitionError, LinterDefinition};
use crate::error::LintError;
use crate::exit_codes::ExitCode;
use crate::logging::init_tracing;
use crate::prerequisite::PrerequisiteStatus;
use lintwrap_config::ConfigError;

/// Main CLI execution function.
///
/// Returns `Ok(())` when nothing was reported, otherwise the exit code to
/// terminate with.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("✗ Failed to initialize logging: {e}");
    }

    let outcome = match &cli.command {
        Commands::Run {
            definition,
            settings,
            json,
            files,
        } => run_linter(definition, settings, *json, files),
        Commands::Check { definition } => check(definition),
    };

    match outcome {
        Ok(ExitCode::SUCCESS) => Ok(()),
        Ok(code) => Err(code),
        Err(err) => {
            eprintln!("✗ {err:#}");
            Err(exit_code_for(&err))
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(lint) = err.downcast_ref::<LintError>() {
        return ExitCode::from(lint);
    }
    if let Some(config) = err.downcast_ref::<ConfigError>() {
        return ExitCode::from(config);
    }
    if err.downcast_ref::<DefinitionError>().is_some() {
        return ExitCode::CONFIG;
    }
    ExitCode::RUNTIME
}

fn run_linter(
    definition: &Path,
    overrides: &[(String, String)],
    json: bool,
    files: &[PathBuf],
) -> Result<ExitCode> {
    let DefinedLinter {
        linter,
        mut settings,
    } = LinterDefinition::load(definition)?.build()?;
    for (key, value) in overrides {
        settings.set(key.as_str(), value.as_str());
    }
    let bound = linter.bind(settings);

    let mut reported = 0;
    if linter.strategy().global {
        if !files.is_empty() {
            warn!(
                linter = %linter.name(),
                "Global linter; ignoring {} file argument(s)",
                files.len()
            );
        }
        reported += report(bound.run_global()?, json)?;
    } else {
        if files.is_empty() {
            eprintln!("✗ No files given for per-file linter '{}'", linter.name());
            return Ok(ExitCode::CONFIG);
        }
        for file in files {
            let content = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
            let filename = file.to_string_lossy();
            reported += report(bound.run_file(&filename, &lines)?, json)?;
        }
    }

    Ok(if reported > 0 {
        ExitCode::FINDINGS
    } else {
        ExitCode::SUCCESS
    })
}

fn report(findings: Findings, json: bool) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;
    for finding in findings {
        if json {
            serde_json::to_writer(&mut out, &finding)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{finding}")?;
        }
        count += 1;
    }
    Ok(count)
}

fn check(definition: &Path) -> Result<ExitCode> {
    let DefinedLinter { linter, .. } = LinterDefinition::load(definition)?.build()?;
    match linter.check_prerequisites() {
        PrerequisiteStatus::Satisfied => {
            println!("✓ {} is available", linter.name());
            Ok(ExitCode::SUCCESS)
        }
        PrerequisiteStatus::Failed(reason) => {
            println!("✗ {}: {reason}", linter.name());
            Ok(ExitCode::FINDINGS)
        }
    }
}

//! CLI argument definitions and parsing structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lintwrap - run external linters through declarative adapters
#[derive(Parser, Debug)]
#[command(name = "lintwrap")]
#[command(about = "Run external linters and report their output as structured findings")]
#[command(long_about = r#"
lintwrap runs an external command-line linter described by a TOML definition
file and turns its output into structured findings.

EXAMPLES:
  # Run a linter over two files
  lintwrap run --definition flake8.toml src/a.py src/b.py

  # Override a setting and print one JSON object per finding
  lintwrap run -d flake8.toml --setting max_line_length=100 --json src/a.py

  # Check that the wrapped tool is installed
  lintwrap check --definition flake8.toml

EXIT CODES:
  0  no findings
  1  findings reported, or prerequisite check failed
  2  invalid arguments, definition or settings
  3  the tool could not run or its output could not be read
"#)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a defined linter and print its findings
    Run {
        /// Linter definition file
        #[arg(short, long)]
        definition: PathBuf,

        /// Setting for the linter's hooks, overriding the definition
        #[arg(long = "setting", value_name = "KEY=VALUE", value_parser = parse_setting)]
        settings: Vec<(String, String)>,

        /// Print findings as JSON lines
        #[arg(long)]
        json: bool,

        /// Files to lint; ignored by global linters
        files: Vec<PathBuf>,
    },

    /// Check whether the wrapped tool is available
    Check {
        /// Linter definition file
        #[arg(short, long)]
        definition: PathBuf,
    },
}

fn parse_setting(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "lintwrap",
            "run",
            "-d",
            "lint.toml",
            "--setting",
            "max=100",
            "--setting",
            "select=E,W",
            "--json",
            "a.py",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                definition,
                settings,
                json,
                files,
            } => {
                assert_eq!(definition, PathBuf::from("lint.toml"));
                assert_eq!(
                    settings,
                    vec![
                        ("max".to_string(), "100".to_string()),
                        ("select".to_string(), "E,W".to_string())
                    ]
                );
                assert!(json);
                assert_eq!(files, vec![PathBuf::from("a.py")]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_setting_needs_key() {
        assert!(parse_setting("=1").is_err());
        assert!(parse_setting("novalue").is_err());
        assert_eq!(
            parse_setting("path=a=b").unwrap(),
            ("path".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["lintwrap", "check", "-d", "x.toml", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}

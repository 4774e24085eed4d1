//! Tests for the `lintwrap` binary: exit codes and report formats.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CAT_DEFINITION: &str = r#"
name = "Cat"
executable = "cat"
arguments = ["{filename}"]

[options]
output_format = "regex"
output_regex = '(?P<line>\d+):(?P<message>.+)'
"#;

fn lintwrap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lintwrap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_findings_exit_one_and_print_json_lines() {
    let dir = TempDir::new().unwrap();
    let definition = write(&dir, "cat.toml", CAT_DEFINITION);
    let file = write(&dir, "input.txt", "3:bad thing\n7:worse thing\n");

    let output = lintwrap(&["run", "-d", &definition, "--json", &file]);
    assert_eq!(output.status.code(), Some(1));

    let findings: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["origin"], "Cat");
    assert_eq!(findings[0]["message"], "bad thing");
    assert_eq!(findings[0]["start_line"], 3);
    assert_eq!(findings[1]["start_line"], 7);
    assert_eq!(findings[1]["file"], serde_json::Value::String(file));
}

#[test]
fn test_no_findings_exit_zero() {
    let dir = TempDir::new().unwrap();
    let definition = write(&dir, "cat.toml", CAT_DEFINITION);
    let file = write(&dir, "empty.txt", "");

    let output = lintwrap(&["run", "--definition", &definition, &file]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_setting_override_reaches_arguments() {
    let dir = TempDir::new().unwrap();
    let definition = write(
        &dir,
        "echo.toml",
        r#"
name = "Echo"
executable = "echo"
arguments = ["1:{setting:word}"]

[options]
output_format = "regex"
output_regex = '(?P<line>\d+):(?P<message>.+)'

[settings]
word = "default"
"#,
    );
    let file = write(&dir, "input.txt", "x\n");

    let output = lintwrap(&["run", "-d", &definition, "--json", &file]);
    assert!(stdout(&output).contains("\"message\":\"default\""));

    let output = lintwrap(&["run", "-d", &definition, "--setting", "word=hello", "--json", &file]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("\"message\":\"hello\""));
}

#[test]
fn test_invalid_definition_exits_two() {
    let dir = TempDir::new().unwrap();
    let bad_format = write(
        &dir,
        "bad.toml",
        r#"
name = "Bad"
executable = "cat"

[options]
output_format = "xml"
"#,
    );
    let file = write(&dir, "input.txt", "x\n");

    let output = lintwrap(&["run", "-d", &bad_format, &file]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid `output_format`"));

    let unknown_key = write(&dir, "unknown.toml", "name = \"X\"\nexecutable = \"cat\"\ncolour = 1\n");
    let output = lintwrap(&["run", "-d", &unknown_key, &file]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_per_file_linter_without_files_exits_two() {
    let dir = TempDir::new().unwrap();
    let definition = write(&dir, "cat.toml", CAT_DEFINITION);

    let output = lintwrap(&["run", "-d", &definition]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_check_reports_missing_tool() {
    let dir = TempDir::new().unwrap();
    let definition = write(
        &dir,
        "missing.toml",
        "name = \"Missing\"\nexecutable = \"lintwrap-surely-missing-tool\"\n\n[options]\noutput_format = \"regex\"\noutput_regex = '(?P<message>.+)'\n",
    );

    let output = lintwrap(&["check", "-d", &definition]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("is not installed"));

    let present = write(&dir, "cat.toml", CAT_DEFINITION);
    let output = lintwrap(&["check", "-d", &present]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Cat is available"));
}

#[test]
fn test_missing_definition_file() {
    let output = lintwrap(&["check", "-d", Path::new("/nonexistent/lint.toml").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style invocation of a wrapped tool
// ============================================================================

/// Specification for one tool invocation.
///
/// Arguments are `Vec<OsString>`, never a shell string: whatever a handler
/// returns from `create_arguments` is passed to the tool verbatim, so file
/// names with spaces or shell metacharacters need no quoting.
///
/// # Example
///
/// ```rust
/// use lintwrap_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("pycodestyle")
///     .arg("--max-line-length=80")
///     .arg("src/module.py")
///     .cwd("/path/to/project");
///
/// assert_eq!(cmd.program, OsString::from("pycodestyle"));
/// assert_eq!(cmd.args.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Optional environment overrides
    pub env: Option<HashMap<OsString, OsString>>,
    /// Bytes piped to the process's stdin; `None` connects stdin to null
    pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` for `program`.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Add a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    ///
    /// ```rust
    /// use lintwrap_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::new("eslint").args(["--format", "unix", "app.js"]);
    /// assert_eq!(cmd.args.len(), 3);
    /// ```
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable for the command.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables for the command.
    #[must_use]
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let env_map = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in envs {
            env_map.insert(key.into(), value.into());
        }
        self
    }

    /// Pipe `input` to the process's stdin.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Program name for log and error messages.
    #[must_use]
    pub fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert into a `std::process::Command`.
    ///
    /// Stdio is left untouched; the runner decides how streams are connected.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(ref env) = self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_new() {
        let cmd = CommandSpec::new("pylint");
        assert_eq!(cmd.program, OsString::from("pylint"));
        assert!(cmd.args.is_empty());
        assert!(cmd.cwd.is_none());
        assert!(cmd.env.is_none());
        assert!(cmd.stdin.is_none());
    }

    #[test]
    fn test_command_spec_builder_chain() {
        let cmd = CommandSpec::new("pylint")
            .arg("--output-format=text")
            .args(["--disable", "C0111"])
            .cwd("/workspace")
            .env("PYTHONPATH", "/workspace")
            .envs([("LANG", "C")])
            .stdin("print(1)\n");

        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.args[1], OsString::from("--disable"));
        assert_eq!(cmd.cwd, Some(PathBuf::from("/workspace")));
        assert_eq!(cmd.env.as_ref().map(HashMap::len), Some(2));
        assert_eq!(cmd.stdin.as_deref(), Some(b"print(1)\n".as_slice()));
    }

    #[test]
    fn test_display_program() {
        assert_eq!(CommandSpec::new("rustfmt").display_program(), "rustfmt");
    }

    #[test]
    fn test_to_command_keeps_args_verbatim() {
        let cmd = CommandSpec::new("echo").arg("a b").arg("$HOME");
        let std_cmd = cmd.to_command();
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, ["a b", "$HOME"]);
        assert_eq!(std_cmd.get_program(), "echo");
    }
}

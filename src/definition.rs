//! Linters declared in TOML definition files
//!
//! A definition names the executable, gives argument and config templates,
//! and carries the adapter options and default settings:
//!
//! ```toml
//! name = "Flake"
//! executable = "flake8"
//! arguments = ["--max-line-length={setting:max_line_length}", "{filename}"]
//!
//! [options]
//! output_format = "regex"
//! output_regex = '(?P<line>\d+):(?P<column>\d+): (?P<message>.*)'
//!
//! [settings]
//! max_line_length = 79
//! ```
//!
//! Templates understand `{filename}`, `{config_file}` (empty without a
//! generated config) and `{setting:<name>}`. Every setting a template names
//! becomes a required parameter of the hook using it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lintwrap_config::{Capabilities, ConfigError, ParamSpec, Settings};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use toml::Table;

use crate::adapter::Linter;
use crate::error::HookError;
use crate::handler::{Hook, HookCall, LintHandler, Target};

static PLACEHOLDER: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{(filename|config_file|setting:([A-Za-z0-9_.-]+))\}"));

/// Errors raised while loading a definition file.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Failed to read definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid definition {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Contents of a definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinterDefinition {
    pub name: String,
    pub executable: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Template of a config file generated for every run
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    /// Adapter options, validated when the linter is built
    #[serde(default)]
    pub options: Table,
    /// Default values of the settings bag
    #[serde(default)]
    pub settings: Table,
}

/// A validated linter together with its default settings.
#[derive(Debug)]
pub struct DefinedLinter {
    pub linter: Linter<TemplateHandler>,
    pub settings: Settings,
}

impl LinterDefinition {
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let text = fs::read_to_string(path).map_err(|source| DefinitionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| DefinitionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the options and build the linter.
    pub fn build(self) -> Result<DefinedLinter, ConfigError> {
        let settings = Settings::from_toml(&self.settings);
        let handler = TemplateHandler {
            name: self.name,
            arguments: self.arguments,
            config: self.config,
            working_dir: self.working_dir,
            environment: self.environment,
        };
        let linter = Linter::new(self.executable, handler, &self.options)?;
        Ok(DefinedLinter { linter, settings })
    }
}

/// Handler expanding the templates of a definition.
#[derive(Debug, Clone)]
pub struct TemplateHandler {
    name: String,
    arguments: Vec<String>,
    config: Option<String>,
    working_dir: Option<PathBuf>,
    environment: BTreeMap<String, String>,
}

impl LintHandler for TemplateHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            generate_config: self.config.is_some(),
            ..Capabilities::default()
        }
    }

    fn params(&self, hook: Hook) -> Vec<ParamSpec> {
        let templates: Vec<&str> = match hook {
            Hook::CreateArguments => self.arguments.iter().map(String::as_str).collect(),
            Hook::GenerateConfig => self.config.iter().map(String::as_str).collect(),
            Hook::ProcessOutput => Vec::new(),
        };
        let mut names: Vec<String> = templates
            .into_iter()
            .flat_map(setting_names)
            .collect();
        names.sort();
        names.dedup();
        names.into_iter().map(ParamSpec::required).collect()
    }

    fn working_dir(&self, _target: &Target<'_>) -> Option<PathBuf> {
        self.working_dir.clone()
    }

    fn environment(&self) -> Vec<(String, String)> {
        self.environment
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn create_arguments(
        &self,
        call: &HookCall<'_>,
        config_file: Option<&Path>,
    ) -> Result<Option<Vec<String>>, HookError> {
        self.arguments
            .iter()
            .map(|template| expand(template, Hook::CreateArguments, call, config_file))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn generate_config(&self, call: &HookCall<'_>) -> Result<Option<String>, HookError> {
        self.config
            .as_deref()
            .map(|template| expand(template, Hook::GenerateConfig, call, None))
            .transpose()
    }
}

fn placeholder_regex(hook: Hook) -> Result<&'static Regex, HookError> {
    PLACEHOLDER
        .as_ref()
        .map_err(|e| HookError::failed(hook.as_str(), e.to_string()))
}

/// Setting names referenced by `template`.
fn setting_names(template: &str) -> Vec<String> {
    let Ok(regex) = PLACEHOLDER.as_ref() else {
        return Vec::new();
    };
    regex
        .captures_iter(template)
        .filter_map(|captures| captures.get(2))
        .map(|name| name.as_str().to_string())
        .collect()
}

fn expand(
    template: &str,
    hook: Hook,
    call: &HookCall<'_>,
    config_file: Option<&Path>,
) -> Result<String, HookError> {
    let regex = placeholder_regex(hook)?;
    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;

    for captures in regex.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        expanded.push_str(&template[last..whole.start()]);
        last = whole.end();

        if let Some(name) = captures.get(2) {
            let value = call.params.get(name.as_str()).ok_or_else(|| {
                HookError::failed(
                    hook.as_str(),
                    format!("setting '{}' is not declared", name.as_str()),
                )
            })?;
            expanded.push_str(value);
            continue;
        }
        match captures.get(1).map(|m| m.as_str()) {
            Some("filename") => expanded.push_str(call.target.filename().unwrap_or_default()),
            Some("config_file") => {
                if let Some(path) = config_file {
                    expanded.push_str(&path.to_string_lossy());
                }
            }
            _ => expanded.push_str(whole.as_str()),
        }
    }

    expanded.push_str(&template[last..]);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use lintwrap_config::HookParams;

    use super::*;
    use crate::handler::DependencyResults;

    const DEFINITION: &str = r#"
name = "Flake"
executable = "flake8"
arguments = ["--max-line-length={setting:max_line_length}", "--config={config_file}", "{filename}"]
config = "[flake8]\nselect = {setting:select}\n"

[options]
output_format = "regex"
output_regex = '(?P<line>\d+): (?P<message>.*)'
config_suffix = ".cfg"

[settings]
max_line_length = 79
"#;

    fn definition() -> LinterDefinition {
        toml::from_str(DEFINITION).unwrap()
    }

    #[test]
    fn test_template_settings_become_required_params() {
        let defined = definition().build().unwrap();
        let handler = defined.linter.handler();

        let args: Vec<_> = handler
            .params(Hook::CreateArguments)
            .into_iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(args, vec!["max_line_length"]);
        assert_eq!(handler.params(Hook::GenerateConfig)[0].name, "select");
        assert_eq!(defined.settings.get("max_line_length"), Some("79"));
        assert!(handler.capabilities().generate_config);
    }

    #[test]
    fn test_expand_placeholders() {
        let handler = definition().build().unwrap().linter.handler().clone();
        let settings = Settings::new().with("max_line_length", "100");
        let params =
            HookParams::resolve(&handler.params(Hook::CreateArguments), &settings).unwrap();
        let deps = DependencyResults::new();
        let lines = Vec::new();
        let call = HookCall {
            target: Target::File {
                filename: "src/a.py",
                lines: &lines,
            },
            params: &params,
            dependency_results: &deps,
        };

        let args = handler
            .create_arguments(&call, Some(Path::new("/tmp/x.cfg")))
            .unwrap()
            .unwrap();
        assert_eq!(
            args,
            vec!["--max-line-length=100", "--config=/tmp/x.cfg", "src/a.py"]
        );

        let args = handler.create_arguments(&call, None).unwrap().unwrap();
        assert_eq!(args[1], "--config=");
    }

    #[test]
    fn test_undeclared_setting_fails_the_hook() {
        let params = HookParams::default();
        let deps = DependencyResults::new();
        let call = HookCall {
            target: Target::Project,
            params: &params,
            dependency_results: &deps,
        };
        let err = expand("{setting:nope}", Hook::CreateArguments, &call, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`create_arguments` failed: setting 'nope' is not declared"
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<LinterDefinition, _> =
            toml::from_str("name = \"X\"\nexecutable = \"x\"\nargs = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_options_surface_as_config_error() {
        let mut definition = definition();
        definition.options.insert("bogus".into(), true.into());
        let err = definition.build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid keyword arguments provided: 'bogus'");
    }
}

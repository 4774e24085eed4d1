use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use toml::{Table, Value};

use crate::error::ConfigError;

/// Description used for parameters declared without one.
const NO_DESCRIPTION: &str = "No description given.";

/// Named-option bag handed to a bound linter.
///
/// Values are kept as strings, the way a settings section stores them, and
/// are parsed into the type a hook asks for when it asks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a TOML table; scalars are stored in their textual form.
    #[must_use]
    pub fn from_toml(table: &Table) -> Self {
        table
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parse a setting, `Ok(None)` when it is not set.
    pub fn get_as<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(name).map(|value| parse_setting(name, value)).transpose()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Extra parameter a handler hook takes from the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    /// Textual default; `None` makes the setting required
    pub default: Option<String>,
}

impl ParamSpec {
    /// A parameter that must be present in the settings.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: NO_DESCRIPTION.to_string(),
            default: None,
        }
    }

    /// A parameter falling back to `default` when not set.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: NO_DESCRIPTION.to_string(),
            default: Some(default.into()),
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Parameter values resolved for one hook call.
///
/// Holds exactly the parameters the hook declared, each taken from the
/// settings or from its declared default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookParams {
    values: BTreeMap<String, String>,
}

impl HookParams {
    /// Resolve `specs` against `settings`.
    ///
    /// Fails with [`ConfigError::MissingSetting`] naming the first required
    /// parameter that is not set.
    pub fn resolve(specs: &[ParamSpec], settings: &Settings) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();
        for spec in specs {
            let value = settings
                .get(&spec.name)
                .or(spec.default.as_deref())
                .ok_or_else(|| ConfigError::MissingSetting(spec.name.clone()))?;
            values.insert(spec.name.clone(), value.to_string());
        }
        Ok(Self { values })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parse a declared parameter.
    ///
    /// Asking for a parameter the hook did not declare is reported as a
    /// missing setting.
    pub fn get_as<T>(&self, name: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self
            .get(name)
            .ok_or_else(|| ConfigError::MissingSetting(name.to_string()))?;
        parse_setting(name, value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn parse_setting<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_toml_stringifies_scalars() {
        let table: Table = toml::from_str(
            r#"
            my_param = 109
            name = "is cool"
            strict = true
            "#,
        )
        .unwrap();
        let settings = Settings::from_toml(&table);

        assert_eq!(settings.get("my_param"), Some("109"));
        assert_eq!(settings.get("name"), Some("is cool"));
        assert_eq!(settings.get_as::<bool>("strict").unwrap(), Some(true));
        assert_eq!(settings.get_as::<i64>("missing").unwrap(), None);
    }

    #[test]
    fn test_hook_params_defaults_and_overrides() {
        let specs = [
            ParamSpec::optional("default", "3"),
            ParamSpec::required("my_param").describe("A superparam!"),
        ];

        let settings = Settings::new().with("my_param", "109");
        let params = HookParams::resolve(&specs, &settings).unwrap();
        assert_eq!(params.get_as::<i64>("default").unwrap(), 3);
        assert_eq!(params.get_as::<i64>("my_param").unwrap(), 109);

        let settings = settings.with("default", "1000");
        let params = HookParams::resolve(&specs, &settings).unwrap();
        assert_eq!(params.get_as::<i64>("default").unwrap(), 1000);
    }

    #[test]
    fn test_hook_params_missing_required() {
        let specs = [ParamSpec::required("superparam")];
        match HookParams::resolve(&specs, &Settings::new()) {
            Err(ConfigError::MissingSetting(name)) => assert_eq!(name, "superparam"),
            other => panic!("expected MissingSetting, got {other:?}"),
        }
    }

    #[test]
    fn test_hook_params_only_hold_declared_names() {
        let settings = Settings::new().with("a", "1").with("b", "2");
        let params = HookParams::resolve(&[ParamSpec::required("a")], &settings).unwrap();
        assert_eq!(params.iter().count(), 1);
        assert!(matches!(
            params.get_as::<i64>("b"),
            Err(ConfigError::MissingSetting(_))
        ));
    }

    #[test]
    fn test_invalid_setting_value() {
        let settings = Settings::new().with("xxx", "not a number");
        let params = HookParams::resolve(&[ParamSpec::optional("xxx", "64")], &settings).unwrap();
        let err = params.get_as::<i64>("xxx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'not a number' for setting 'xxx': invalid digit found in string"
        );
    }

    #[test]
    fn test_param_spec_descriptions() {
        assert_eq!(ParamSpec::required("x").description, "No description given.");
        assert!(ParamSpec::required("x").is_required());
        assert!(!ParamSpec::optional("x", "1").is_required());
    }
}

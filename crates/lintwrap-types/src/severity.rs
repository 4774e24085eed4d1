use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Normalized severity of a finding.
///
/// Tools report severities in their own vocabulary; a severity map translates
/// those labels into one of these three levels. The numeric level (`0`, `1`,
/// `2`) is accepted wherever a severity is configured.
///
/// # Example
///
/// ```rust
/// use lintwrap_types::Severity;
///
/// assert_eq!("major".parse::<Severity>().unwrap(), Severity::Major);
/// assert_eq!(Severity::from_level(0), Some(Severity::Info));
/// assert_eq!(Severity::Normal.to_string(), "NORMAL");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Severity {
    Info = 0,
    #[default]
    Normal = 1,
    Major = 2,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Normal, Severity::Major];

    /// Look up a severity by its numeric level.
    #[must_use]
    pub fn from_level(level: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.level() == level)
    }

    #[must_use]
    pub const fn level(self) -> i64 {
        self as i64
    }
}

static DEFAULT_SEVERITY_MAP: Lazy<BTreeMap<String, Severity>> = Lazy::new(|| {
    let groups: [(&[&str], Severity); 3] = [
        (
            &["critical", "c", "fatal", "fail", "f", "error", "err", "e"],
            Severity::Major,
        ),
        (&["warning", "warn", "w"], Severity::Normal),
        (
            &["information", "info", "i", "note", "suggestion"],
            Severity::Info,
        ),
    ];

    groups
        .into_iter()
        .flat_map(|(labels, severity)| {
            labels
                .iter()
                .map(move |label| ((*label).to_string(), severity))
        })
        .collect()
});

/// Severity labels understood when a linter does not configure its own map.
///
/// Keys are lower-case; matched labels are lower-cased before lookup.
#[must_use]
pub fn default_severity_map() -> BTreeMap<String, Severity> {
    DEFAULT_SEVERITY_MAP.clone()
}

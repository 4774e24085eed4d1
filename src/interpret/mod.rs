//! Built-in output interpreters
//!
//! Each interpreter turns the captured text of one stream into a lazy
//! sequence of [`Finding`]s. With both streams captured, every stream is
//! interpreted on its own and the results are chained in capture order.
//!
//! - [`regex`]: one finding per match of the configured pattern
//! - [`corrected`]: output is the corrected file, diffed against the original
//! - [`unified`]: output is a unified diff of the original

pub mod corrected;
pub mod regex;
pub mod unified;

use lintwrap_config::DiffOptions;
use lintwrap_diff::Diff;
use lintwrap_types::Finding;

pub use self::regex::{RegexInterpreter, SeverityWarnings};

/// One finding per piece of `diff` after regrouping with the configured distance.
///
/// Findings span the original-side lines of their piece; columns stay unknown.
pub(crate) fn diff_findings<'a>(
    origin: &'a str,
    options: &'a DiffOptions,
    filename: &'a str,
    diff: &Diff,
) -> impl Iterator<Item = Finding> + use<'a> {
    diff.split(options.distance).into_iter().map(move |piece| {
        let range = piece.affected_range();
        Finding::new(origin, options.result_message.as_str(), options.severity)
            .with_file(filename)
            .with_position(range.map(|r| r.start), None, range.map(|r| r.end), None)
            .with_diff(filename, piece)
    })
}

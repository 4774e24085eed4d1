use lintwrap_config::DiffOptions;
use lintwrap_diff::{Diff, DiffError};
use lintwrap_types::Finding;

use super::diff_findings;

/// Findings for the hunks of a unified diff against `original`.
///
/// The whole text is parsed before the first finding is produced, so a
/// malformed diff fails without partial results.
pub fn findings<'a>(
    origin: &'a str,
    options: &'a DiffOptions,
    filename: &'a str,
    original: &[String],
    text: &str,
) -> Result<impl Iterator<Item = Finding> + use<'a>, DiffError> {
    let diff = Diff::from_unified_diff(text, original)?;
    Ok(diff_findings(origin, options, filename, &diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_incomplete_hunk_is_accepted() {
        let original = lines("a\nb\nc\nd\ne\n");
        let patch = "--- a/f\n+++ b/f\n@@ -1,5 +1,5 @@\n-a\n+A\n b\n c\n-d\n+D\n";
        let options = DiffOptions::default();

        let ranges: Vec<_> = findings("Fmt", &options, "f", &original, patch)
            .unwrap()
            .map(|f| (f.start_line, f.end_line))
            .collect();
        assert_eq!(ranges, vec![(Some(1), Some(1)), (Some(4), Some(4))]);
    }

    #[test]
    fn test_context_mismatch_is_an_error() {
        let original = lines("a\nb\n");
        let patch = "@@ -1,2 +1,2 @@\n x\n-b\n+c\n";
        assert!(findings("Fmt", &DiffOptions::default(), "f", &original, patch).is_err());
    }
}

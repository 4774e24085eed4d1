use lintwrap_config::DiffOptions;
use lintwrap_diff::Diff;
use lintwrap_types::Finding;

use super::diff_findings;

/// Findings for the differences between `original` and the corrected `text`.
///
/// `text` is the complete corrected file; it is split into lines keeping
/// their endings before diffing.
pub fn findings<'a>(
    origin: &'a str,
    options: &'a DiffOptions,
    filename: &'a str,
    original: &[String],
    text: &str,
) -> impl Iterator<Item = Finding> + use<'a> {
    let corrected: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    let diff = Diff::from_lines(original, &corrected);
    diff_findings(origin, options, filename, &diff)
}

#[cfg(test)]
mod tests {
    use lintwrap_types::Severity;

    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_single_changed_line() {
        let options = DiffOptions::default();
        let original = lines("a\nb\n");
        let found: Vec<_> = findings("Fmt", &options, "f.txt", &original, "a\nc\n").collect();

        assert_eq!(found.len(), 1);
        let finding = &found[0];
        assert_eq!(finding.start_line, Some(2));
        assert_eq!(finding.end_line, Some(2));
        assert_eq!(finding.start_column, None);
        assert_eq!(finding.severity, Severity::Normal);
        assert_eq!(finding.message, "Inconsistency found.");
        assert_eq!(finding.file.as_deref(), Some("f.txt"));
        assert_eq!(finding.diffs["f.txt"].apply(), lines("a\nc\n"));
    }

    #[test]
    fn test_identical_output_has_no_findings() {
        let options = DiffOptions::default();
        let original = lines("x\ny\n");
        assert_eq!(findings("Fmt", &options, "f", &original, "x\ny\n").count(), 0);
    }

    #[test]
    fn test_distance_controls_grouping() {
        let original = lines("1\n2\n3\n4\n5\n");
        let corrected = "one\n2\nthree\n4\nfive\n";

        let merged = DiffOptions::default();
        assert_eq!(findings("Fmt", &merged, "f", &original, corrected).count(), 1);

        let apart = DiffOptions {
            distance: -1,
            ..DiffOptions::default()
        };
        assert_eq!(findings("Fmt", &apart, "f", &original, corrected).count(), 3);
    }
}

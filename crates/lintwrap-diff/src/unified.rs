use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DiffError;
use crate::model::{Diff, strip_eol};

// @@ -old_start[,old_count] +new_start[,new_count] @@
static HUNK_HEADER: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@"));

#[derive(Debug)]
struct HunkState {
    /// Next original line consumed by a context or removal line
    original_line: usize,
    old_remaining: usize,
    new_remaining: usize,
}

impl HunkState {
    fn exhausted(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }
}

impl Diff {
    /// Parse a unified diff describing changes to `original`.
    ///
    /// File headers (`---`, `+++`, `diff`, `index`) are optional and ignored.
    /// Context and removed lines are checked against `original` (line endings
    /// are not compared). A hunk that stops before the line counts announced in
    /// its header is accepted as-is. Added lines end like the first original
    /// line: `\r\n`, `\n`, or nothing when the original lines carry no endings.
    pub fn from_unified_diff<S: AsRef<str>>(
        diff_text: &str,
        original: &[S],
    ) -> Result<Self, DiffError> {
        let mut diff = Self::new(
            original
                .iter()
                .map(|line| line.as_ref().to_string())
                .collect(),
        );
        // Added lines follow the line-ending convention of the original
        let eol = match original.first().map(AsRef::as_ref) {
            Some(first) if first.ends_with("\r\n") => "\r\n",
            Some(first) if !first.ends_with('\n') => "",
            _ => "\n",
        };

        let hunk_header = HUNK_HEADER.as_ref().map_err(|e| DiffError::InvalidHunkHeader {
            line: 0,
            header: e.to_string(),
        })?;

        let mut hunk: Option<HunkState> = None;

        for (index, line) in diff_text.lines().enumerate() {
            if line.starts_with("@@") {
                let captures =
                    hunk_header
                        .captures(line)
                        .ok_or_else(|| DiffError::InvalidHunkHeader {
                            line: index + 1,
                            header: line.to_string(),
                        })?;
                let number = |group: usize, default: usize| {
                    captures
                        .get(group)
                        .map_or(Some(default), |m| m.as_str().parse().ok())
                };
                let (Some(old_start), Some(old_count), Some(new_count)) =
                    (number(1, 0), number(2, 1), number(4, 1))
                else {
                    return Err(DiffError::InvalidHunkHeader {
                        line: index + 1,
                        header: line.to_string(),
                    });
                };

                hunk = Some(HunkState {
                    // A hunk without old lines inserts *after* `old_start`
                    original_line: if old_count == 0 {
                        old_start + 1
                    } else {
                        old_start
                    },
                    old_remaining: old_count,
                    new_remaining: new_count,
                });
                continue;
            }

            let Some(state) = hunk.as_mut() else {
                continue;
            };
            if state.exhausted() || line.starts_with('\\') {
                continue;
            }

            let (marker, text) = match line.chars().next() {
                Some(marker @ (' ' | '-' | '+')) => (marker, &line[1..]),
                // Some tools strip the single space of empty context lines
                None => (' ', ""),
                Some(_) => {
                    hunk = None;
                    continue;
                }
            };

            match marker {
                '+' => {
                    let after = state.original_line.saturating_sub(1);
                    diff.add_lines(after, [format!("{text}{eol}")])?;
                    state.new_remaining = state.new_remaining.saturating_sub(1);
                }
                _ => {
                    let line_nr = state.original_line;
                    diff.check_line(line_nr, 1)?;
                    let expected = strip_eol(&diff.original()[line_nr - 1]);
                    if expected != strip_eol(text) {
                        return Err(DiffError::ContextMismatch {
                            line: line_nr,
                            expected: expected.to_string(),
                            found: text.to_string(),
                        });
                    }
                    if marker == '-' {
                        diff.delete_line(line_nr)?;
                    } else {
                        state.new_remaining = state.new_remaining.saturating_sub(1);
                    }
                    state.old_remaining = state.old_remaining.saturating_sub(1);
                    state.original_line += 1;
                }
            }
        }

        Ok(diff)
    }
}

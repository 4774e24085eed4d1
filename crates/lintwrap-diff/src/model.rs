use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag, capture_diff_slices};

use crate::error::DiffError;

/// Number of unchanged lines rendered around each hunk by [`Diff::unified_diff`].
const CONTEXT_LINES: usize = 3;

/// Change attached to a single original line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// The original line is removed
    pub deleted: bool,
    /// The original line is replaced by this text
    pub replacement: Option<String>,
    /// Lines inserted after the original line
    pub add_after: Vec<String>,
}

impl LineChange {
    /// Whether the original line itself is modified (not only followed by insertions).
    #[must_use]
    pub fn touches_line(&self) -> bool {
        self.deleted || self.replacement.is_some()
    }
}

/// Inclusive, 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    fn cover(range: Option<Self>, start: usize, end: usize) -> Self {
        match range {
            None => Self { start, end },
            Some(r) => Self {
                start: r.start.min(start),
                end: r.end.max(end),
            },
        }
    }
}

/// Line-granular diff against a shared original.
///
/// Pieces produced by [`Diff::split`] share the original lines, so splitting a
/// large diff does not copy the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    original: Arc<Vec<String>>,
    changes: BTreeMap<usize, LineChange>,
}

impl Diff {
    /// Create a diff without changes.
    #[must_use]
    pub fn new(original: Vec<String>) -> Self {
        Self {
            original: Arc::new(original),
            changes: BTreeMap::new(),
        }
    }

    /// Compute the diff turning `original` into `modified`.
    ///
    /// A replaced block changes its first line, inserts the remaining new
    /// lines after it and deletes the remaining old lines.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(original: &[S], modified: &[S]) -> Self {
        let old: Vec<&str> = original.iter().map(AsRef::as_ref).collect();
        let new: Vec<&str> = modified.iter().map(AsRef::as_ref).collect();

        let mut diff = Self::new(old.iter().map(|line| (*line).to_string()).collect());

        for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {}
                DiffTag::Delete => {
                    for index in old_range {
                        diff.entry(index + 1).deleted = true;
                    }
                }
                DiffTag::Insert => {
                    diff.entry(old_range.start)
                        .add_after
                        .extend(new[new_range].iter().map(|line| (*line).to_string()));
                }
                DiffTag::Replace => {
                    let first = old_range.start + 1;
                    let change = diff.entry(first);
                    change.replacement = Some(new[new_range.start].to_string());
                    change.add_after.extend(
                        new[new_range.start + 1..new_range.end]
                            .iter()
                            .map(|line| (*line).to_string()),
                    );
                    for index in old_range.start + 1..old_range.end {
                        diff.entry(index + 1).deleted = true;
                    }
                }
            }
        }

        diff
    }

    /// The original lines this diff applies to.
    #[must_use]
    pub fn original(&self) -> &[String] {
        &self.original
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of original lines carrying a change.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Changes in original-line order.
    pub fn changes(&self) -> impl Iterator<Item = (usize, &LineChange)> {
        self.changes.iter().map(|(line, change)| (*line, change))
    }

    /// Replace original line `line` (1-based) with `text`.
    pub fn change_line(&mut self, line: usize, text: impl Into<String>) -> Result<(), DiffError> {
        self.check_line(line, 1)?;
        let change = self.entry(line);
        if change.deleted {
            return Err(DiffError::ConflictingChange {
                line,
                reason: "line is already deleted".to_string(),
            });
        }
        change.replacement = Some(text.into());
        Ok(())
    }

    /// Delete original line `line` (1-based).
    pub fn delete_line(&mut self, line: usize) -> Result<(), DiffError> {
        self.check_line(line, 1)?;
        let change = self.entry(line);
        if change.replacement.is_some() {
            return Err(DiffError::ConflictingChange {
                line,
                reason: "line is already changed".to_string(),
            });
        }
        change.deleted = true;
        Ok(())
    }

    /// Insert `lines` after original line `after` (`0` inserts at the top).
    pub fn add_lines<I, S>(&mut self, after: usize, lines: I) -> Result<(), DiffError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_line(after, 0)?;
        let added: Vec<String> = lines.into_iter().map(Into::into).collect();
        if !added.is_empty() {
            self.entry(after).add_after.extend(added);
        }
        Ok(())
    }

    /// Regroup the changes into separate diffs.
    ///
    /// Two changed lines stay in the same piece when at most `distance`
    /// unchanged lines separate them. A negative distance puts every changed
    /// line into its own piece.
    #[must_use]
    pub fn split(&self, distance: i64) -> Vec<Diff> {
        let mut pieces = Vec::new();
        let mut current = BTreeMap::new();
        let mut last_line: i64 = -1;

        for (&line, change) in &self.changes {
            let line_nr = i64::try_from(line).unwrap_or(i64::MAX);
            let reach = last_line.saturating_add(distance).saturating_add(1);
            if !current.is_empty() && line_nr > reach {
                pieces.push(self.piece(std::mem::take(&mut current)));
            }
            last_line = line_nr;
            current.insert(line, change.clone());
        }

        if !current.is_empty() {
            pieces.push(self.piece(current));
        }

        pieces
    }

    /// Original lines affected by this diff.
    ///
    /// Insertions before the first line count as affecting line 1.
    #[must_use]
    pub fn affected_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self.changes.keys().map(|line| (*line).max(1)).collect();
        lines.dedup();
        lines
    }

    /// Smallest original-side range covering every change.
    #[must_use]
    pub fn affected_range(&self) -> Option<LineRange> {
        let lines = self.affected_lines();
        Some(LineRange {
            start: *lines.first()?,
            end: *lines.last()?,
        })
    }

    /// Smallest range of the modified content covering every change.
    ///
    /// A pure deletion maps to the position where the removed lines used to be.
    #[must_use]
    pub fn modified_range(&self) -> Option<LineRange> {
        let mut range = None;
        let mut cursor = 1;

        if let Some(change) = self.changes.get(&0) {
            let count = change.add_after.len();
            range = Some(LineRange::cover(range, cursor, cursor + count.saturating_sub(1)));
            cursor += count;
        }

        for line in 1..=self.original.len() {
            match self.changes.get(&line) {
                None => cursor += 1,
                Some(change) if change.touches_line() => {
                    let produced = usize::from(!change.deleted) + change.add_after.len();
                    range = Some(LineRange::cover(
                        range,
                        cursor,
                        cursor + produced.saturating_sub(1),
                    ));
                    cursor += produced;
                }
                Some(change) => {
                    let count = change.add_after.len();
                    range = Some(LineRange::cover(
                        range,
                        cursor + 1,
                        cursor + count.max(1),
                    ));
                    cursor += 1 + count;
                }
            }
        }

        range
    }

    /// Apply the changes and return the modified lines.
    #[must_use]
    pub fn apply(&self) -> Vec<String> {
        let mut modified = Vec::with_capacity(self.original.len());

        if let Some(change) = self.changes.get(&0) {
            modified.extend(change.add_after.iter().cloned());
        }

        for (index, line) in self.original.iter().enumerate() {
            match self.changes.get(&(index + 1)) {
                None => modified.push(line.clone()),
                Some(change) => {
                    if !change.deleted {
                        modified.push(change.replacement.clone().unwrap_or_else(|| line.clone()));
                    }
                    modified.extend(change.add_after.iter().cloned());
                }
            }
        }

        modified
    }

    /// Render the diff as a unified diff for `filename`.
    #[must_use]
    pub fn unified_diff(&self, filename: &str) -> String {
        let mut out = format!("--- a/{filename}\n+++ b/{filename}\n");
        let mut offset: i64 = 0;

        for piece in self.split(2 * CONTEXT_LINES as i64) {
            let (Some(first), Some(last)) = (
                piece.changes.keys().next().copied(),
                piece.changes.keys().next_back().copied(),
            ) else {
                continue;
            };

            let start = first.saturating_sub(CONTEXT_LINES).max(1);
            let end = (last + CONTEXT_LINES).min(self.original.len());

            let mut body = Vec::new();
            let (mut old_count, mut new_count) = (0usize, 0usize);

            if let Some(change) = piece.changes.get(&0) {
                for added in &change.add_after {
                    body.push(format!("+{}", strip_eol(added)));
                    new_count += 1;
                }
            }

            for line in start..=end {
                let text = strip_eol(&self.original[line - 1]);
                match piece.changes.get(&line) {
                    None => {
                        body.push(format!(" {text}"));
                        old_count += 1;
                        new_count += 1;
                    }
                    Some(change) => {
                        if change.deleted {
                            body.push(format!("-{text}"));
                            old_count += 1;
                        } else if let Some(replacement) = &change.replacement {
                            body.push(format!("-{text}"));
                            body.push(format!("+{}", strip_eol(replacement)));
                            old_count += 1;
                            new_count += 1;
                        } else {
                            body.push(format!(" {text}"));
                            old_count += 1;
                            new_count += 1;
                        }
                        for added in &change.add_after {
                            body.push(format!("+{}", strip_eol(added)));
                            new_count += 1;
                        }
                    }
                }
            }

            let old_start = if old_count == 0 { start - 1 } else { start };
            let new_start = (start as i64 + offset).max(0) as usize;
            let new_start = if new_count == 0 {
                new_start.saturating_sub(1)
            } else {
                new_start
            };
            out.push_str(&format!(
                "@@ -{old_start},{old_count} +{new_start},{new_count} @@\n"
            ));
            for line in body {
                out.push_str(&line);
                out.push('\n');
            }

            offset += new_count as i64 - old_count as i64;
        }

        out
    }

    pub(crate) fn entry(&mut self, line: usize) -> &mut LineChange {
        self.changes.entry(line).or_default()
    }

    pub(crate) fn check_line(&self, line: usize, min: usize) -> Result<(), DiffError> {
        if line < min || line > self.original.len() {
            return Err(DiffError::LineOutOfRange {
                line,
                len: self.original.len(),
            });
        }
        Ok(())
    }

    fn piece(&self, changes: BTreeMap<usize, LineChange>) -> Diff {
        Diff {
            original: Arc::clone(&self.original),
            changes,
        }
    }
}

pub(crate) fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

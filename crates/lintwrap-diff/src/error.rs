//! Error types for diff construction and parsing

use thiserror::Error;

/// Errors raised while building or parsing a [`Diff`](crate::Diff)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("Line {line} is outside of the original content ({len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    #[error("Conflicting change for line {line}: {reason}")]
    ConflictingChange { line: usize, reason: String },

    #[error("Invalid hunk header on diff line {line}: {header}")]
    InvalidHunkHeader { line: usize, header: String },

    #[error("Diff does not match original at line {line}: expected {expected:?}, found {found:?}")]
    ContextMismatch {
        line: usize,
        expected: String,
        found: String,
    },
}

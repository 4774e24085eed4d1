//! Line-level diffs between a file and a modified version of it
//!
//! A [`Diff`] records changes per *original* line: a line can be replaced,
//! deleted, and/or have new lines inserted after it (line `0` holds insertions
//! before the first line). Keeping changes line-granular is what allows
//! [`Diff::split`] to regroup them with an arbitrary merge distance.
//!
//! Diffs are built either from two line sequences ([`Diff::from_lines`]) or by
//! parsing a unified diff against the original content
//! ([`Diff::from_unified_diff`]).

mod error;
mod model;
mod unified;

pub use error::DiffError;
pub use model::{Diff, LineChange, LineRange};

//! Configuration resolver for lintwrap adapters
//!
//! A linter is declared with a flat table of options (see [`LinterOptions`]
//! for the typed way to build one). [`ExecutionStrategy::resolve`] validates
//! that table once, at definition time, and produces the immutable strategy
//! the adapter runs with. Every inconsistency is a [`ConfigError`]; nothing
//! is re-checked when the linter runs.
//!
//! The crate also holds the named-option bag handed to handler hooks
//! ([`Settings`]) and the per-hook parameter declarations resolved against
//! it ([`ParamSpec`], [`HookParams`]).

mod error;
mod format;
mod options;
mod settings;
mod strategy;
mod validation;

pub use error::ConfigError;
pub use format::OutputFormat;
pub use options::LinterOptions;
pub use settings::{HookParams, ParamSpec, Settings};
pub use strategy::{
    Capabilities, DEFAULT_DIFF_DISTANCE, DEFAULT_PREREQUISITE_FAIL_MESSAGE, DEFAULT_RESULT_MESSAGE,
    DiffOptions, ExecutionStrategy, Numbering, OutputStrategy, PrerequisiteCheck, RegexOptions,
};

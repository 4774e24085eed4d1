//! Value types shared across lintwrap crates
//!
//! - [`Severity`]: the normalized three-level severity scale
//! - [`Finding`]: one issue reported by a wrapped tool

mod finding;
mod severity;

pub use finding::Finding;
pub use severity::{Severity, default_severity_map};

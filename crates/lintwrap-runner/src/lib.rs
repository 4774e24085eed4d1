//! Subprocess execution for wrapped tools
//!
//! All process execution goes through [`CommandSpec`] so that arguments reach
//! the tool as discrete argv elements; no shell string is ever evaluated.
//! [`NativeRunner`] is the only implementation of [`ProcessRunner`] shipped
//! here; tests substitute their own runners to feed canned output.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};

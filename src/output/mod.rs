//! Output formatting module
//!
//! Provides console views of a run summary.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter, RunInspection};

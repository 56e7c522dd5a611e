//! Data models for newman run summaries
//!
//! This module contains the read-only input structures the reporter consumes.

mod collection;
mod summary;

pub use collection::{Collection, LocatedItem, ResponseInfo};
pub use summary::{Assertion, ErrorInfo, Execution, RunSummary};

#[cfg(test)]
pub use collection::{Item, ItemGroup};
#[cfg(test)]
pub use summary::ItemRef;

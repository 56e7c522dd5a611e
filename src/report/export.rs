//! Export descriptors handed back to the host

use serde::Serialize;
use std::path::PathBuf;

/// Short name identifying this reporter's exports
pub const REPORTER_NAME: &str = "junit-xray";

/// File name used when no export path is configured
pub const DEFAULT_FILE_NAME: &str = "newman-run-report.xml";

/// A generated report file, persisted by the host
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportDescriptor {
    pub name: String,
    pub default: String,
    /// Explicit output path; `None` lets the host decide
    pub path: Option<PathBuf>,
    pub content: String,
}

impl ExportDescriptor {
    pub fn new(content: String, path: Option<PathBuf>) -> Self {
        Self {
            name: REPORTER_NAME.to_string(),
            default: DEFAULT_FILE_NAME.to_string(),
            path,
            content,
        }
    }
}

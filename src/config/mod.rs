//! Configuration module
//!
//! Handles loading and layering configuration.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::ConfigFile;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Directory for reports without an explicit export path
    pub output_dir: PathBuf,

    /// Reporter options
    pub reporter: ReporterOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output_dir: PathBuf::from("."),
            reporter: ReporterOptions::default(),
        }
    }
}

/// Options recognized by the JUnit reporter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterOptions {
    /// Output path override for the XML report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<PathBuf>,

    /// Separator between ancestor folder names in suite names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::env::EnvConfig;
use super::{is_yaml, AppConfig, ReporterOptions};
use crate::utils::LogLevel;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./newman-junit-xray.yaml",
    "./newman-junit-xray.yml",
    "./.newman-junit-xray.yaml",
    "~/.config/newman-junit-xray/config.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load from an explicit path, or the first standard location found
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::find() {
                Some(found) => Self::load(found),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        if LogLevel::parse(&self.app.log_level).is_none() {
            anyhow::bail!(
                "Invalid log level '{}'. Valid levels: trace, debug, info, warn, error",
                self.app.log_level
            );
        }

        if self.app.reporter.separator.as_deref() == Some("") {
            anyhow::bail!("Reporter separator must not be empty");
        }

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: "1.0".to_string(),
            app: AppConfig {
                log_level: "info".to_string(),
                output_dir: PathBuf::from("./newman"),
                reporter: ReporterOptions {
                    export: None,
                    separator: Some(" / ".to_string()),
                },
            },
        }
    }

    /// Apply environment overrides on top of the file settings
    pub fn resolve(self, env: &EnvConfig) -> AppConfig {
        let mut app = self.app;

        if let Some(level) = &env.log_level {
            app.log_level = level.clone();
        }
        if let Some(dir) = &env.output_dir {
            app.output_dir = PathBuf::from(dir);
        }
        if let Some(export) = &env.export {
            app.reporter.export = Some(PathBuf::from(export));
        }
        if let Some(separator) = &env.separator {
            app.reporter.separator = Some(separator.clone());
        }

        app
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "NEWMAN_JUNIT_XRAY";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Report path from NEWMAN_JUNIT_XRAY_EXPORT
    pub export: Option<String>,
    /// Output directory from NEWMAN_JUNIT_XRAY_OUTPUT_DIR
    pub output_dir: Option<String>,
    /// Name separator from NEWMAN_JUNIT_XRAY_SEPARATOR
    pub separator: Option<String>,
    /// Config file from NEWMAN_JUNIT_XRAY_CONFIG
    pub config_file: Option<String>,
    /// Log level from NEWMAN_JUNIT_XRAY_LOG
    pub log_level: Option<String>,
    /// Verbose from NEWMAN_JUNIT_XRAY_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            export: get_env("EXPORT"),
            output_dir: get_env("OUTPUT_DIR"),
            separator: get_env("SEPARATOR"),
            config_file: get_env("CONFIG"),
            log_level: get_env("LOG"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.export.is_some()
            || self.output_dir.is_some()
            || self.separator.is_some()
            || self.config_file.is_some()
            || self.log_level.is_some()
            || self.verbose.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_EXPORT:      {:?}", ENV_PREFIX, self.export);
        println!("  {}_OUTPUT_DIR:  {:?}", ENV_PREFIX, self.output_dir);
        println!("  {}_SEPARATOR:   {:?}", ENV_PREFIX, self.separator);
        println!("  {}_CONFIG:      {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_LOG:         {:?}", ENV_PREFIX, self.log_level);
        println!("  {}_VERBOSE:     {:?}", ENV_PREFIX, self.verbose);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn export(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_EXPORT"), path.into()));
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_SEPARATOR"), separator.into()));
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_VERBOSE"), verbose.to_string()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all NEWMAN_JUNIT_XRAY environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_EXPORT       Output path for the XML report");
    println!("  {ENV_PREFIX}_OUTPUT_DIR   Directory for reports without an export path");
    println!("  {ENV_PREFIX}_SEPARATOR    Separator between folder names in suite names");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
    println!("  {ENV_PREFIX}_LOG          Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_VERBOSE      Enable debug logging (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_EXPORT=reports/junit.xml");
    println!("  newman-junit-xray report --summary newman/run.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.export.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .export("ci/junit.xml")
            .separator(" > ")
            .verbose(true)
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.export, Some("ci/junit.xml".to_string()));
        assert_eq!(config.separator, Some(" > ".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert!(config.has_any());
    }
}

//! Diagnostic logging for the reporter
//!
//! Everything goes to stderr so `report --stdout` output stays pure XML.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Crate target the filter directive applies to
const LOG_TARGET: &str = "newman_junit_xray";

/// Verbosity accepted by `log_level` and `NEWMAN_JUNIT_XRAY_LOG`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        let level = match name.trim().to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => return None,
        };
        Some(level)
    }

    /// Pick the effective level: verbose forces debug, otherwise the
    /// configured name, falling back to info.
    pub fn resolve(configured: &str, verbose: bool) -> Self {
        if verbose {
            return LogLevel::Debug;
        }
        LogLevel::parse(configured).unwrap_or(LogLevel::Info)
    }

    fn directive(self) -> String {
        format!("{LOG_TARGET}={}", Level::from(self))
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init_logger(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("unknown"), None);
    }

    #[test]
    fn test_log_level_resolve() {
        assert_eq!(LogLevel::resolve("warn", false), LogLevel::Warn);
        assert_eq!(LogLevel::resolve("warn", true), LogLevel::Debug);
        assert_eq!(LogLevel::resolve("bogus", false), LogLevel::Info);
    }

    #[test]
    fn test_filter_directive_targets_crate() {
        assert_eq!(LogLevel::Warn.directive(), "newman_junit_xray=WARN");
        assert_eq!(LogLevel::Trace.directive(), "newman_junit_xray=TRACE");
    }
}

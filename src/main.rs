//! newman-junit-xray - JUnit XML reporter for newman collection runs
//!
//! Reads the JSON summary newman writes at the end of a collection run and
//! turns it into a JUnit-compatible XML report, one `testsuite` per request.
//!
//! ## Usage
//!
//! ```bash
//! # Produce the summary with newman's JSON reporter
//! newman run collection.json -r json --reporter-json-export newman/run.json
//!
//! # Convert it
//! newman-junit-xray report --summary newman/run.json --export reports/junit.xml
//!
//! # Preview the suites without writing anything
//! newman-junit-xray inspect --summary newman/run.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

mod cli;
mod config;
mod host;
mod models;
mod output;
mod report;
mod utils;

use cli::Args;
use config::{AppConfig, ConfigFile, EnvConfig};
use host::Exports;
use models::RunSummary;
use output::{OutputFormat, ResultFormatter, RunInspection};
use report::JunitReporter;
use utils::LogLevel;

fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let config_path = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(Into::into));
    let config_file = ConfigFile::load_or_default(config_path.as_deref())?;
    let app = config_file.resolve(&env);

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    utils::init_logger(LogLevel::resolve(&app.log_level, verbose));
    if env.has_any() {
        debug!(?env, "Environment overrides present");
    }
    debug!(?app, "Configuration resolved");

    match args.command {
        cli::Command::Report(report_args) => {
            generate_report(report_args, app)?;
        }
        cli::Command::Inspect(inspect_args) => {
            inspect_summary(inspect_args, &app)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config.as_deref())?;
        }
    }

    Ok(())
}

/// Read a run summary from a file, or stdin for "-"
fn read_summary(source: &str) -> Result<RunSummary> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read summary from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read summary file: {source}"))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse newman JSON summary: {source}"))
}

fn generate_report(args: cli::ReportArgs, mut app: AppConfig) -> Result<()> {
    if let Some(export) = args.export {
        app.reporter.export = Some(export);
    }
    if let Some(separator) = args.separator {
        app.reporter.separator = Some(separator);
    }
    if let Some(out_dir) = args.out_dir {
        app.output_dir = out_dir;
    }

    let summary = read_summary(&args.summary)?;

    let mut exports = Exports::new();
    JunitReporter::new(app.reporter)
        .on_before_done(&summary, &mut exports)
        .context("Failed to build JUnit report")?;

    debug!(exports = exports.len(), "Reporter finished");
    if exports.is_empty() {
        warn!(
            collection = summary.collection.name(),
            "Run summary has no executions, no report produced"
        );
        return Ok(());
    }

    if args.stdout {
        for descriptor in exports.iter() {
            print!("{}", descriptor.content);
        }
    } else {
        for path in exports.persist(&app.output_dir)? {
            println!("✓ Report written: {}", path.display());
        }
    }

    Ok(())
}

fn inspect_summary(args: cli::InspectArgs, app: &AppConfig) -> Result<()> {
    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;

    let summary = read_summary(&args.summary)?;
    let inspection = RunInspection::from_summary(&summary, &app.reporter);

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_inspection(&inspection));

    Ok(())
}

fn manage_config(args: cli::ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    output.display()
                );
            }

            ConfigFile::example().save(&output)?;
            println!("✓ Configuration file created: {}", output.display());
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { env, format } => {
            if env {
                EnvConfig::load().print_summary();
                println!();
                config::print_env_help();
            } else {
                let config = ConfigFile::load_or_default(explicit)?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&config)?
                } else {
                    serde_yaml::to_string(&config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = file
                .or_else(|| explicit.map(Path::to_path_buf))
                .or_else(ConfigFile::find)
                .ok_or_else(|| anyhow::anyhow!("No configuration file found"))?;

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {}", path.display());
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {}", path.display());
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

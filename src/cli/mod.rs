//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JUnit/Xray XML reporter for newman run summaries
#[derive(Parser, Debug)]
#[command(name = "newman-junit-xray")]
#[command(version)]
#[command(about = "Convert newman run summaries into JUnit XML reports")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a JUnit XML report from a run summary
    Report(ReportArgs),

    /// Show the suites a report would contain
    Inspect(InspectArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// newman JSON summary file, or '-' for stdin
    #[arg(short, long, default_value = "-")]
    pub summary: String,

    /// Output path for the XML report
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Directory for the report when no export path is set
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Separator between folder names in suite names
    #[arg(long)]
    pub separator: Option<String>,

    /// Print the XML to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// newman JSON summary file, or '-' for stdin
    #[arg(short, long, default_value = "-")]
    pub summary: String,

    /// Output format (table, json, json-pretty)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for config management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output file
        #[arg(short, long, default_value = "./newman-junit-xray.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Show environment variables instead
        #[arg(long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// File to validate (defaults to the first standard location found)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fluxqc_validate::ValidationMode;

#[derive(Parser)]
#[command(
    name = "fluxqc",
    version,
    about = "Quality checks for half-hourly flux and meteorological time series",
    long_about = "Run structural and statistical checks over a flux CSV file.\n\n\
                  Writes a JSON process report with one severity-graded entry per check."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check one flux file and write its process report.
    Check(CheckArgs),

    /// List the message table.
    Messages(MessagesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Flux CSV file with TIMESTAMP_START and TIMESTAMP_END columns.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML settings file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Message table to use instead of the bundled one.
    #[arg(long = "messages", value_name = "PATH")]
    pub messages: Option<PathBuf>,

    /// Variable dictionary CSV to use instead of the bundled one.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Directory for report files (default: <FILE directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evaluation phase.
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// MAD multiplier for spike detection.
    #[arg(long = "spike-threshold", value_name = "FACTOR")]
    pub spike_threshold: Option<f64>,

    /// Name recorded as the report's processor.
    #[arg(long = "processor", value_name = "NAME")]
    pub processor: Option<String>,

    /// Original upload name recorded in the report.
    #[arg(long = "upload-filename", value_name = "NAME")]
    pub upload_filename: Option<String>,

    /// Run the checks and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct MessagesArgs {
    /// Message table to list instead of the bundled one.
    #[arg(long = "messages", value_name = "PATH")]
    pub messages: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Format,
    Base,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Format => ValidationMode::Format,
            ModeArg::Base => ValidationMode::Base,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

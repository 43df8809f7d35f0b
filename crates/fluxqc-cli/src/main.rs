//! `fluxqc` command line.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use fluxqc_cli::commands::{load_messages, run_check};
use fluxqc_cli::config::{CliOverrides, FileConfig, resolve_settings};
use fluxqc_cli::logging::{LogConfig, LogFormat, init_logging};
use fluxqc_cli::types::{CheckOutcome, EXIT_CONFIG, EXIT_PASSED};

mod cli;
mod summary;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_catalog, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_CONFIG);
    }
    let exit_code = match cli.command {
        Command::Check(args) => match check(args) {
            Ok(outcome) => {
                print_summary(&outcome);
                outcome.exit_code()
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_CONFIG
            }
        },
        Command::Messages(args) => match load_messages(args.messages.as_deref()) {
            Ok(catalog) => {
                print_catalog(&catalog);
                EXIT_PASSED
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_CONFIG
            }
        },
    };
    std::process::exit(exit_code);
}

fn check(args: CheckArgs) -> anyhow::Result<CheckOutcome> {
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let overrides = CliOverrides {
        mode: args.mode.map(Into::into),
        spike_threshold: args.spike_threshold,
        processor: args.processor,
        messages: args.messages,
        dictionary: args.dictionary,
        output_dir: args.output_dir,
    };
    let settings = resolve_settings(&file_config, overrides)?;
    run_check(&args.file, &settings, args.upload_filename, args.dry_run)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

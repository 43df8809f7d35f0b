//! Run settings from an optional TOML file and command-line overrides.
//!
//! Precedence: command-line flag, then config file, then built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use fluxqc_validate::{CheckOptions, MAX_RESOLUTION_MINUTES, ValidationMode};

pub const DEFAULT_PROCESSOR: &str = "fluxqc";

/// Settings file contents; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<ValidationMode>,
    pub spike_threshold: Option<f64>,
    pub mandatory_variables: Option<Vec<String>>,
    pub resolution_minutes: Option<i64>,
    pub processor: Option<String>,
    pub messages: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<ValidationMode>,
    pub spike_threshold: Option<f64>,
    pub processor: Option<String>,
    pub messages: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub options: CheckOptions,
    pub processor: String,
    /// `None` uses the bundled message table.
    pub messages: Option<PathBuf>,
    /// `None` uses the bundled variable dictionary.
    pub dictionary: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

pub fn resolve_settings(file: &FileConfig, cli: CliOverrides) -> Result<Settings> {
    let defaults = CheckOptions::default();
    let options = CheckOptions {
        mode: cli.mode.or(file.mode).unwrap_or(defaults.mode),
        spike_threshold: cli
            .spike_threshold
            .or(file.spike_threshold)
            .unwrap_or(defaults.spike_threshold),
        mandatory_variables: file
            .mandatory_variables
            .clone()
            .unwrap_or(defaults.mandatory_variables),
        default_resolution_minutes: file
            .resolution_minutes
            .unwrap_or(defaults.default_resolution_minutes),
    };
    if !(options.spike_threshold.is_finite() && options.spike_threshold > 0.0) {
        bail!(
            "spike threshold must be a positive number, got {}",
            options.spike_threshold
        );
    }
    if !(1..=MAX_RESOLUTION_MINUTES).contains(&options.default_resolution_minutes) {
        bail!(
            "resolution must be between 1 and {MAX_RESOLUTION_MINUTES} minutes, got {}",
            options.default_resolution_minutes
        );
    }
    Ok(Settings {
        options,
        processor: cli
            .processor
            .or_else(|| file.processor.clone())
            .unwrap_or_else(|| DEFAULT_PROCESSOR.to_string()),
        messages: cli.messages.or_else(|| file.messages.clone()),
        dictionary: cli.dictionary.or_else(|| file.dictionary.clone()),
        output_dir: cli.output_dir.or_else(|| file.output_dir.clone()),
    })
}

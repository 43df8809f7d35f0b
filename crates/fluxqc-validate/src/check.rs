//! The check contract.

use serde::{Deserialize, Serialize};

use fluxqc_model::{Dataset, Status, VariableDictionary};

use crate::builder::StatusBuilder;
use crate::checks::spike::DEFAULT_THRESHOLD;
use crate::error::CheckError;

/// Variables held to the stricter gap-fill rules in `base` mode.
pub const DEFAULT_MANDATORY_VARIABLES: &[&str] = &["TA", "SW_IN", "VPD"];

/// Longest cadence accepted as a default resolution: one leap year.
pub const MAX_RESOLUTION_MINUTES: i64 = 366 * 24 * 60;

/// Evaluation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Upload format review; mandatory status is ignored.
    #[default]
    Format,
    /// Base product review; mandatory variables get stricter handling.
    Base,
}

impl ValidationMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "format" => Some(Self::Format),
            "base" => Some(Self::Base),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Base => "base",
        }
    }
}

/// Tunables shared by all checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    pub mode: ValidationMode,
    /// Nominal MAD multiplier for spike detection.
    pub spike_threshold: f64,
    pub mandatory_variables: Vec<String>,
    /// Cadence used when the first row does not give one.
    pub default_resolution_minutes: i64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            spike_threshold: DEFAULT_THRESHOLD,
            mandatory_variables: DEFAULT_MANDATORY_VARIABLES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            default_resolution_minutes: 30,
        }
    }
}

impl CheckOptions {
    pub fn is_mandatory(&self, base: &str) -> bool {
        self.mandatory_variables
            .iter()
            .any(|name| name.eq_ignore_ascii_case(base))
    }
}

/// Everything a check may read during one run.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub dataset: &'a Dataset,
    pub dictionary: &'a dyn VariableDictionary,
    pub builder: StatusBuilder<'a>,
    pub options: &'a CheckOptions,
}

/// One validation check.
///
/// `run` never mutates shared state: every invocation starts from a fresh
/// finding log, so running a check twice yields the same statuses.
pub trait Check {
    /// Message-table id of the check's primary status.
    fn id(&self) -> &'static str;

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError>;
}

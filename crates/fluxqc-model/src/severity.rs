//! Severity levels shared by findings, statuses, and reports.
//!
//! Levels are totally ordered `Ok < Warning < Error < Fatal`. The numeric
//! code runs the other way (the most severe level has the smallest code), so
//! rolling a collection up is a minimum over codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome severity of a finding or status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Nothing to report
    Ok,
    /// Should review
    Warning,
    /// Must fix
    Error,
    /// The check itself could not complete
    Fatal,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric status code written to reports.
    pub fn code(self) -> i8 {
        match self {
            Self::Ok => 0,
            Self::Warning => -1,
            Self::Error => -2,
            Self::Fatal => -3,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            -1 => Some(Self::Warning),
            -2 => Some(Self::Error),
            -3 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Canonical label used at serialization boundaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "OK" => Some(Self::Ok),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "FATAL" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// True for levels that fail a run.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }

    /// Roll a collection up to its most severe member (smallest code).
    ///
    /// An empty collection is `Ok`.
    pub fn aggregate<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        severities
            .into_iter()
            .min_by_key(|severity| severity.code())
            .unwrap_or(Self::Ok)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

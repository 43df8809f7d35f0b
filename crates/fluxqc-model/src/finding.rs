//! Findings and the per-check finding log.
//!
//! A check writes everything it observes into its own [`FindingLog`]; the
//! log is later consumed by the status builder. Outcomes are read from the
//! log's data, never inferred from logging output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Check-specific finding data - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingPayload {
    // Missing data
    /// Column has no present value in any row
    ColumnAllMissing { column: String },

    // Gap filling
    /// Variable has gaps and no flag companion covers them
    GapsUnfilled { variable: String, gap_count: u64 },
    /// Mandatory variable has no column in the file
    MandatoryMissing { variable: String },
    /// Flag companion exists but leaves some gaps uncovered
    PartialFill {
        variable: String,
        flag: String,
        uncovered: u64,
    },

    // Spikes
    /// Isolated single-point excursion
    Outlier {
        variable: String,
        row: usize,
        timestamp: Option<String>,
        value: f64,
    },

    // Timestamps
    /// Timestamp does not have the fixed `YYYYMMDDHHMM` length
    TimestampLength {
        column: String,
        row: usize,
        value: String,
    },
    /// Timestamp cannot be read as a date-time integer
    TimestampCast {
        column: String,
        row: usize,
        value: String,
    },
    /// Values that occur more than once in a timestamp column
    DuplicateTimestamps { column: String, groups: u64 },
    /// Start timestamp differs from the running expected timestamp
    CadenceGap {
        row: usize,
        expected: String,
        found: String,
    },
    /// End of one row does not equal the start of the next
    ContinuityGap {
        row: usize,
        end: String,
        next_start: String,
    },
    /// One side of an end/start pair could not be parsed
    ContinuityUnparseable {
        row: usize,
        end: String,
        next_start: String,
    },

    // Headers and types
    /// Header base name is not in the variable dictionary
    UnknownVariable { column: String },
    /// Present values that are not numeric
    NonNumeric {
        column: String,
        count: u64,
        samples: Vec<String>,
    },
}

impl FindingPayload {
    /// Identifier listed in single-list statuses.
    pub fn subject(&self) -> String {
        match self {
            Self::ColumnAllMissing { column } => column.clone(),
            Self::GapsUnfilled { variable, .. } => variable.clone(),
            Self::MandatoryMissing { variable } => format!("{variable} (absent)"),
            Self::PartialFill { variable, .. } => variable.clone(),
            Self::Outlier {
                timestamp: Some(timestamp),
                ..
            } => timestamp.clone(),
            Self::Outlier { row, .. } => format!("row {row}"),
            Self::TimestampLength { column, row, .. } => format!("{column} row {row}"),
            Self::TimestampCast { column, row, .. } => format!("{column} row {row}"),
            Self::DuplicateTimestamps { column, groups } => {
                format!("{column} ({groups} duplicated)")
            }
            Self::CadenceGap { row, .. } => format!("TIMESTAMP_START row {row}"),
            Self::ContinuityGap { row, .. } => format!("TIMESTAMP_END row {row}"),
            Self::ContinuityUnparseable { row, .. } => format!("TIMESTAMP_END row {row}"),
            Self::UnknownVariable { column } => column.clone(),
            Self::NonNumeric { column, .. } => column.clone(),
        }
    }
}

/// One recorded observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub payload: FindingPayload,
}

/// Count of findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
    pub fatal: usize,
}

impl SeveritySummary {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Ok => self.ok += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
            Severity::Fatal => self.fatal += 1,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Ok => self.ok,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Fatal => self.fatal,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.warning + self.error + self.fatal
    }

    /// Findings above `Ok`.
    pub fn flagged(&self) -> usize {
        self.warning + self.error + self.fatal
    }

    /// Most severe level with a non-zero count, `Ok` when empty.
    pub fn worst(&self) -> Severity {
        Severity::aggregate(
            Severity::ALL
                .into_iter()
                .filter(|severity| self.count(*severity) > 0),
        )
    }
}

/// Accumulator for one check (or sub-scope) in one run.
#[derive(Debug, Clone, Default)]
pub struct FindingLog {
    scope: String,
    findings: Vec<Finding>,
    summary: SeveritySummary,
}

impl FindingLog {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            findings: Vec::new(),
            summary: SeveritySummary::default(),
        }
    }

    pub fn record(&mut self, severity: Severity, payload: FindingPayload) {
        self.summary.add(severity);
        self.findings.push(Finding { severity, payload });
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn summary(&self) -> SeveritySummary {
        self.summary
    }

    pub fn worst(&self) -> Severity {
        self.summary.worst()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Subjects of findings above `Ok`, first occurrence order, de-duplicated.
    pub fn subjects(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.findings
            .iter()
            .filter(|finding| finding.severity != Severity::Ok)
            .map(|finding| finding.payload.subject())
            .filter(|subject| seen.insert(subject.clone()))
            .collect()
    }

    pub fn into_subjects(self) -> Vec<String> {
        self.subjects()
    }
}

//! Process report assembled from the statuses of one run.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use fluxqc_model::{Severity, Status, StatusDetail};

use crate::error::Result;

/// Run metadata supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMeta {
    pub process_type: String,
    pub processor: String,
    /// Name of the file that was checked.
    pub file_name: String,
    pub headers: Vec<String>,
    pub upload_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfirmation {
    pub status_start_msg: String,
    pub status_end_msg: String,
    /// Worst severity code over all checks.
    pub status_code: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub new: String,
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_filename: Option<String>,
}

/// One reported check; composite statuses nest their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckEntry {
    pub check_id: String,
    pub check_name: String,
    pub status: Severity,
    pub status_code: i8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_checks: Vec<CheckEntry>,
}

impl From<&Status> for CheckEntry {
    fn from(status: &Status) -> Self {
        let (items, sub_checks) = match &status.detail {
            StatusDetail::Message => (Vec::new(), Vec::new()),
            StatusDetail::List(items) => (items.clone(), Vec::new()),
            StatusDetail::Composite(children) => {
                (Vec::new(), children.iter().map(CheckEntry::from).collect())
            }
        };
        Self {
            check_id: status.check_id.clone(),
            check_name: status.display_name.clone(),
            status: status.severity,
            status_code: status.code(),
            message: status.report_message.clone(),
            items,
            sub_checks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub process_type: String,
    pub processor: String,
    /// RFC 3339, UTC.
    pub process_datetime: String,
    pub process_confirmation: ProcessConfirmation,
    pub files: FileInfo,
    /// Top-level checks per severity label; every label is present.
    pub check_summary: BTreeMap<String, usize>,
    pub checks: Vec<CheckEntry>,
}

impl ProcessReport {
    pub fn build(meta: &ReportMeta, statuses: &[Status]) -> Self {
        Self::build_at(meta, statuses, Utc::now())
    }

    pub fn build_at(meta: &ReportMeta, statuses: &[Status], at: DateTime<Utc>) -> Self {
        let overall = Severity::aggregate(statuses.iter().map(|status| status.severity));
        let mut check_summary: BTreeMap<String, usize> = Severity::ALL
            .iter()
            .map(|severity| (severity.label().to_string(), 0))
            .collect();
        for status in statuses {
            *check_summary
                .entry(status.severity.label().to_string())
                .or_default() += 1;
        }
        Self {
            process_type: meta.process_type.clone(),
            processor: meta.processor.clone(),
            process_datetime: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            process_confirmation: ProcessConfirmation {
                status_start_msg: start_message(&meta.file_name, statuses.len()),
                status_end_msg: end_message(overall).to_string(),
                status_code: overall.code(),
            },
            files: FileInfo {
                new: meta.file_name.clone(),
                headers: meta.headers.clone(),
                upload_filename: meta.upload_filename.clone(),
            },
            check_summary,
            checks: statuses.iter().map(CheckEntry::from).collect(),
        }
    }

    pub fn overall(&self) -> Severity {
        Severity::from_code(self.process_confirmation.status_code).unwrap_or(Severity::Fatal)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn start_message(file_name: &str, checks: usize) -> String {
    let s = if checks == 1 { "" } else { "s" };
    format!("Ran {checks} check{s} on {file_name}.")
}

fn end_message(overall: Severity) -> &'static str {
    match overall {
        Severity::Ok => "All checks passed.",
        Severity::Warning => "Checks passed with warnings.",
        Severity::Error => "Checks found errors that must be corrected.",
        Severity::Fatal => "One or more checks could not run.",
    }
}

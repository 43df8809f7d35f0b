//! Reportable check outcomes.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Outcome of one check, or of one sub-scope inside a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub check_id: String,
    pub display_name: String,
    pub severity: Severity,
    /// Rendered message body.
    pub message: String,
    /// Message with the catalog's report prefix and suffix applied.
    pub report_message: String,
    pub detail: StatusDetail,
}

/// Shape of a status: a bare message, a list of offending identifiers, or
/// child statuses rolled up into this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum StatusDetail {
    Message,
    List(Vec<String>),
    Composite(Vec<Status>),
}

impl Status {
    pub fn code(&self) -> i8 {
        self.severity.code()
    }

    pub fn children(&self) -> &[Status] {
        match &self.detail {
            StatusDetail::Composite(children) => children,
            _ => &[],
        }
    }

    pub fn list(&self) -> &[String] {
        match &self.detail {
            StatusDetail::List(items) => items,
            _ => &[],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.detail, StatusDetail::Composite(_))
    }
}

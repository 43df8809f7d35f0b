use std::path::PathBuf;

use fluxqc_model::{Severity, Status};
use fluxqc_report::ProcessReport;

/// Exit code for runs whose worst status is OK or WARNING.
pub const EXIT_PASSED: i32 = 0;
/// Exit code for runs with an ERROR or FATAL status.
pub const EXIT_FAILED: i32 = 1;
/// Exit code when configuration or input could not be loaded.
pub const EXIT_CONFIG: i32 = 2;

/// Everything one `check` invocation produced.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub file: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub statuses: Vec<Status>,
    pub report: ProcessReport,
    pub report_path: Option<PathBuf>,
    pub status_path: Option<PathBuf>,
}

impl CheckOutcome {
    pub fn overall(&self) -> Severity {
        Severity::aggregate(self.statuses.iter().map(|status| status.severity))
    }

    pub fn exit_code(&self) -> i32 {
        if self.overall().is_failure() {
            EXIT_FAILED
        } else {
            EXIT_PASSED
        }
    }
}

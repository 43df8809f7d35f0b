//! Process report generation.
//!
//! - [`ProcessReport`]: run metadata plus one entry per check status
//! - JSON artifacts: the report itself and the raw status list

mod artifacts;
mod error;
mod process;

pub use artifacts::{
    read_raw_statuses, read_report, raw_status_path, report_path, write_raw_statuses,
    write_report,
};
pub use error::{ReportError, Result};
pub use process::{CheckEntry, FileInfo, ProcessConfirmation, ProcessReport, ReportMeta};

//! JSON artifacts written next to each other in an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use fluxqc_model::Status;

use crate::error::{Result, io_error};
use crate::process::ProcessReport;

/// Stem used for artifact names: the checked file's name without extension.
fn stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("fluxqc")
        .to_string()
}

pub fn report_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}-report.json", stem(file_name)))
}

pub fn raw_status_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}-status.json", stem(file_name)))
}

fn write_json(path: &Path, mut json: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    json.push('\n');
    fs::write(path, json).map_err(io_error(path))
}

/// Write `<stem>-report.json` into `dir`, creating it when needed.
pub fn write_report(dir: &Path, report: &ProcessReport) -> Result<PathBuf> {
    let path = report_path(dir, &report.files.new);
    write_json(&path, report.to_json()?)?;
    info!(path = %path.display(), code = report.process_confirmation.status_code, "wrote report");
    Ok(path)
}

/// Write the unreduced statuses as `<stem>-status.json`.
pub fn write_raw_statuses(dir: &Path, file_name: &str, statuses: &[Status]) -> Result<PathBuf> {
    let path = raw_status_path(dir, file_name);
    write_json(&path, serde_json::to_string_pretty(statuses)?)?;
    info!(path = %path.display(), statuses = statuses.len(), "wrote raw statuses");
    Ok(path)
}

pub fn read_report(path: &Path) -> Result<ProcessReport> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    ProcessReport::from_json(&text)
}

pub fn read_raw_statuses(path: &Path) -> Result<Vec<Status>> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(serde_json::from_str(&text)?)
}

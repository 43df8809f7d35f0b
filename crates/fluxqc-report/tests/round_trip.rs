//! Written artifacts read back into the same report.

use fluxqc_model::{Severity, Status, StatusDetail};
use fluxqc_report::{
    ProcessReport, ReportError, ReportMeta, read_raw_statuses, read_report, write_raw_statuses,
    write_report,
};
use tempfile::tempdir;

fn status(check_id: &str, severity: Severity, detail: StatusDetail) -> Status {
    Status {
        check_id: check_id.to_string(),
        display_name: check_id.replace('_', " "),
        severity,
        message: format!("{check_id} finished."),
        report_message: format!("{check_id} finished."),
        detail,
    }
}

fn statuses() -> Vec<Status> {
    vec![
        status("timestamp_continuity", Severity::Ok, StatusDetail::List(Vec::new())),
        status(
            "missing_data",
            Severity::Warning,
            StatusDetail::List(vec!["P".to_string()]),
        ),
        status(
            "spike_detection",
            Severity::Warning,
            StatusDetail::Composite(vec![
                status("spike_detection", Severity::Warning, StatusDetail::Message),
                status("spike_detection", Severity::Ok, StatusDetail::Message),
            ]),
        ),
        status("gap_fill", Severity::Error, StatusDetail::List(vec!["TA".to_string()])),
    ]
}

fn meta() -> ReportMeta {
    ReportMeta {
        process_type: "BASE Generation".to_string(),
        processor: "fluxqc".to_string(),
        file_name: "US-Ha1_HH_201801010000_201801020000.csv".to_string(),
        headers: vec!["TIMESTAMP_START".to_string(), "TIMESTAMP_END".to_string()],
        upload_filename: Some("upload.csv".to_string()),
    }
}

#[test]
fn report_round_trip_preserves_checks_and_code() {
    let dir = tempdir().unwrap();
    let report = ProcessReport::build(&meta(), &statuses());
    let path = write_report(dir.path(), &report).unwrap();
    assert!(path.ends_with("US-Ha1_HH_201801010000_201801020000-report.json"));

    let parsed = read_report(&path).unwrap();
    assert_eq!(parsed, report);
    assert_eq!(parsed.process_confirmation.status_code, -2);
    let ids: Vec<&str> = parsed.checks.iter().map(|c| c.check_id.as_str()).collect();
    assert_eq!(
        ids,
        ["timestamp_continuity", "missing_data", "spike_detection", "gap_fill"]
    );
    assert_eq!(parsed.checks[2].sub_checks.len(), 2);
    assert_eq!(parsed.files.upload_filename.as_deref(), Some("upload.csv"));
}

#[test]
fn raw_statuses_round_trip() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("runs").join("first");
    let path = write_raw_statuses(&nested, &meta().file_name, &statuses()).unwrap();
    assert!(path.starts_with(&nested));
    assert_eq!(read_raw_statuses(&path).unwrap(), statuses());
}

#[test]
fn written_report_uses_severity_labels() {
    let dir = tempdir().unwrap();
    let report = ProcessReport::build(&meta(), &statuses());
    let path = write_report(dir.path(), &report).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"status\": \"WARNING\""));
    assert!(text.contains("\"status_code\": -1"));
    assert!(text.ends_with("}\n"));
}

#[test]
fn unreadable_report_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = read_report(&dir.path().join("missing-report.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn malformed_report_is_a_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad-report.json");
    std::fs::write(&path, "{\"process_type\": 3}").unwrap();
    assert!(matches!(read_report(&path).unwrap_err(), ReportError::Json(_)));
}

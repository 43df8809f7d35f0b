//! Checks run against small in-memory datasets.

mod common;

use fluxqc_model::{FindingLog, Severity, TIMESTAMP_END, TIMESTAMP_START};
use fluxqc_validate::checks::gap_fill::{GapClass, GapSlot};
use fluxqc_validate::checks::timestamp::TimestampReport;
use fluxqc_validate::{
    CheckError, CheckOptions, DataTypeCheck, GapFillCheck, MissingDataCheck, SpikeDetectionCheck,
    TimestampContinuityCheck, ValidationMode, VariableNamesCheck,
};

use common::{dataset, dictionary, half_hourly, run_check, strings};

/// Base mode with only `TA` mandatory.
fn base_mode() -> CheckOptions {
    CheckOptions {
        mode: ValidationMode::Base,
        mandatory_variables: vec!["TA".to_string()],
        ..CheckOptions::default()
    }
}

#[test]
fn missing_data_lists_empty_columns() {
    let (starts, _) = half_hourly(2);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["-9999", "-9999"])),
        ("SW_IN", strings(&["1", "2"])),
        ("P", strings(&["", ""])),
    ]);
    let statuses = run_check(
        &MissingDataCheck,
        &data,
        &dictionary(&[]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].severity, Severity::Warning);
    assert_eq!(statuses[0].list(), ["TA".to_string(), "P".to_string()]);
    assert_eq!(statuses[0].message, "2 variables contain no data: TA, P.");
}

#[test]
fn missing_data_reports_fully_empty_file() {
    let (starts, _) = half_hourly(2);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["-9999", "-9999"])),
        ("P", strings(&["", "-9999.0"])),
    ]);
    let mut log = FindingLog::new("missing_data");
    let result = MissingDataCheck.evaluate(&data, &mut log);
    assert!(result.all_missing());
    assert_eq!(result.total_columns, 2);

    let statuses = run_check(
        &MissingDataCheck,
        &data,
        &dictionary(&[]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[1].check_id, "all_data_missing");
    assert_eq!(statuses[1].message, "All 2 data variables are missing.");
}

#[test]
fn missing_data_without_rows_counts_every_column() {
    let data = dataset(&[
        (TIMESTAMP_START, Vec::new()),
        ("TA", Vec::new()),
        ("SW_IN", Vec::new()),
    ]);
    let mut log = FindingLog::new("missing_data");
    let result = MissingDataCheck.evaluate(&data, &mut log);
    assert_eq!(result.missing_columns, vec!["TA", "SW_IN"]);
}

#[test]
fn missing_data_passes_populated_file() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["1", "-9999", "3"])),
    ]);
    let statuses = run_check(
        &MissingDataCheck,
        &data,
        &dictionary(&[]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Ok);
    assert_eq!(statuses[0].message, "All variables contain data.");
}

#[test]
fn gap_fill_flags_unfilled_mandatory_variable_in_base_mode() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["1", "-9999", "3"])),
        ("P", strings(&["0", "0", "-9999"])),
    ]);
    let dict = dictionary(&["TA", "P"]);

    let statuses = run_check(&GapFillCheck, &data, &dict, &base_mode());
    assert_eq!(statuses[0].severity, Severity::Error);
    assert_eq!(statuses[0].list(), ["TA".to_string()]);

    let statuses = run_check(&GapFillCheck, &data, &dict, &CheckOptions::default());
    assert_eq!(statuses[0].severity, Severity::Ok);
}

#[test]
fn gap_fill_reports_absent_mandatory_variables_in_base_mode() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("P", strings(&["0", "0.2", "0"])),
        ("VPD_F", strings(&["1", "1", "1"])),
    ]);
    let dict = dictionary(&["TA", "SW_IN", "VPD", "P"]);
    let base = CheckOptions {
        mode: ValidationMode::Base,
        ..CheckOptions::default()
    };

    let mut log = FindingLog::new("gap_fill");
    let evaluated = GapFillCheck.evaluate(&data, &dict, &base, &mut log);
    assert_eq!(evaluated.len(), 1);
    assert_eq!(log.summary().error, 3);

    let statuses = run_check(&GapFillCheck, &data, &dict, &base);
    assert_eq!(statuses[0].severity, Severity::Error);
    assert_eq!(
        statuses[0].list(),
        ["TA (absent)", "SW_IN (absent)", "VPD (absent)"].map(String::from)
    );
    assert_eq!(
        statuses[0].message,
        "3 variables absent or with unfilled gaps: TA (absent), SW_IN (absent), VPD (absent)."
    );

    let statuses = run_check(&GapFillCheck, &data, &dict, &CheckOptions::default());
    assert_eq!(statuses[0].severity, Severity::Ok);
}

#[test]
fn gap_fill_leaves_gapped_optional_variable_empty_in_format_mode() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("P", strings(&["0", "-9999", "0"])),
    ]);
    let mut log = FindingLog::new("gap_fill");
    let evaluated =
        GapFillCheck.evaluate(&data, &dictionary(&["P"]), &CheckOptions::default(), &mut log);

    assert!(log.is_empty());
    assert_eq!(evaluated.len(), 1);
    assert_eq!(evaluated[0].class, GapClass::Unfilled { gaps: 1 });
    assert_eq!(evaluated[0].result.no_gaps, GapSlot::NoValue);
    assert_eq!(evaluated[0].result.mandatory, GapSlot::NoValue);
    assert_eq!(evaluated[0].result.filled, GapSlot::NoValue);
}

#[test]
fn gap_fill_accepts_covering_flag() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["1", "-9999", "3"])),
        ("TA_F", strings(&["-9999", "2", "-9999"])),
    ]);
    let dict = dictionary(&["TA"]);
    let mut log = FindingLog::new("gap_fill");
    let evaluated = GapFillCheck.evaluate(&data, &dict, &base_mode(), &mut log);

    assert!(log.is_empty());
    assert_eq!(evaluated.len(), 1);
    assert_eq!(evaluated[0].class, GapClass::Filled { gaps: 1 });
    assert_eq!(evaluated[0].flag.as_deref(), Some("TA_F"));
    assert_eq!(
        evaluated[0].result.filled,
        GapSlot::Variable("TA_F".to_string())
    );
}

#[test]
fn gap_fill_warns_on_partial_cover() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("SWC_1_1_1", strings(&["-9999", "-9999", "3"])),
        ("SWC_F_1_1_1", strings(&["1", "-9999", "-9999"])),
    ]);
    let statuses = run_check(
        &GapFillCheck,
        &data,
        &dictionary(&["SWC"]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Warning);
    assert_eq!(statuses[0].list(), ["SWC_1_1_1".to_string()]);
}

#[test]
fn gap_fill_skips_unknown_variables() {
    let (starts, _) = half_hourly(2);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("MYSTERY", strings(&["-9999", "1"])),
    ]);
    let mut log = FindingLog::new("gap_fill");
    let evaluated = GapFillCheck.evaluate(&data, &dictionary(&["TA"]), &base_mode(), &mut log);
    assert!(evaluated.is_empty());
}

fn timestamps(starts: &[&str], ends: &[&str]) -> fluxqc_model::Dataset {
    dataset(&[
        (TIMESTAMP_START, strings(starts)),
        (TIMESTAMP_END, strings(ends)),
    ])
}

fn evaluate_timestamps(data: &fluxqc_model::Dataset) -> (TimestampReport, FindingLog) {
    let mut log = FindingLog::new("timestamp_continuity");
    let report = TimestampContinuityCheck
        .evaluate(data, &CheckOptions::default(), &mut log)
        .unwrap();
    (report, log)
}

#[test]
fn regular_half_hour_cadence_is_clean() {
    let data = timestamps(
        &["201801010000", "201801010030", "201801010100", "201801010130"],
        &["201801010030", "201801010100", "201801010130", "201801010200"],
    );
    let (report, log) = evaluate_timestamps(&data);
    assert!(log.is_empty());
    assert_eq!(report.resolution_minutes, 30);
    assert_eq!(report.continuity_gaps, 0);

    let statuses = run_check(
        &TimestampContinuityCheck,
        &data,
        &dictionary(&[]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Ok);
}

#[test]
fn rolled_back_timestamp_is_reported_on_its_row() {
    let data = timestamps(
        &["201801010000", "201801010030", "201801010000", "201801010130"],
        &["201801010030", "201801010100", "201801010030", "201801010200"],
    );
    let (report, log) = evaluate_timestamps(&data);
    assert_eq!(report.cadence_gaps, 2);
    assert_eq!(report.continuity_gaps, 2);
    assert_eq!(report.duplicate_groups[TIMESTAMP_START], 1);
    assert_eq!(report.duplicate_groups[TIMESTAMP_END], 1);
    assert_eq!(
        log.subjects(),
        vec![
            "TIMESTAMP_START (1 duplicated)",
            "TIMESTAMP_END (1 duplicated)",
            "TIMESTAMP_START row 2",
            "TIMESTAMP_START row 3",
            "TIMESTAMP_END row 1",
            "TIMESTAMP_END row 2",
        ]
    );
    assert_eq!(log.worst(), Severity::Error);
}

#[test]
fn malformed_timestamps_are_distinct_from_gaps() {
    let data = timestamps(
        &["201801010000", "2018010100", "201801010100"],
        &["201801010030", "2018010101", "bad"],
    );
    let (report, _) = evaluate_timestamps(&data);
    assert_eq!(report.length_mismatches, 2);
    assert_eq!(report.cast_failures, 1);
    assert_eq!(report.continuity_gaps, 0);
    assert_eq!(report.unparseable_pairs, 2);
}

#[test]
fn cadence_falls_back_to_default_resolution() {
    let data = timestamps(
        &["201801010000", "201801010100"],
        &["201801010000", "201801010100"],
    );
    let (report, _) = evaluate_timestamps(&data);
    assert_eq!(report.resolution_minutes, 30);
    assert_eq!(report.cadence_gaps, 1);
    assert_eq!(report.continuity_gaps, 1);
}

#[test]
fn out_of_range_resolution_is_a_data_shape_error() {
    let data = timestamps(
        &["201801010000", "201801010100"],
        &["201801010000", "201801010100"],
    );
    for minutes in [1_000_000_000_000, i64::MAX] {
        let options = CheckOptions {
            default_resolution_minutes: minutes,
            ..CheckOptions::default()
        };
        let mut log = FindingLog::new("timestamp_continuity");
        let err = TimestampContinuityCheck
            .evaluate(&data, &options, &mut log)
            .unwrap_err();
        assert!(matches!(err, CheckError::DataShape { .. }));
    }
}

#[test]
fn missing_timestamp_column_is_a_data_shape_error() {
    let data = dataset(&[(TIMESTAMP_START, strings(&["201801010000"]))]);
    let mut log = FindingLog::new("timestamp_continuity");
    let err = TimestampContinuityCheck
        .evaluate(&data, &CheckOptions::default(), &mut log)
        .unwrap_err();
    assert!(err.to_string().contains(TIMESTAMP_END));
}

fn noise(i: usize) -> f64 {
    10.0 + 0.1 * ((((i * 7) % 5) as f64) - 2.0)
}

#[test]
fn spike_is_reported_with_its_timestamp() {
    let (starts, _) = half_hourly(40);
    let flux: Vec<String> = (0..40)
        .map(|i| {
            let value = if i == 20 { 40.0 } else { noise(i) };
            value.to_string()
        })
        .collect();
    let steady: Vec<String> = (0..40).map(|i| noise(i).to_string()).collect();
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("FC", flux),
        ("TA", steady),
    ]);

    let logs = SpikeDetectionCheck.evaluate(&data, 4.0);
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].subjects(), vec!["201801011000"]);
    assert!(logs[1].is_empty());

    let statuses = run_check(
        &SpikeDetectionCheck,
        &data,
        &dictionary(&["FC", "TA"]),
        &CheckOptions::default(),
    );
    let status = &statuses[0];
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.message, "Spikes detected in 1 of 2 variables.");
    let children: Vec<&str> = status
        .children()
        .iter()
        .map(|child| child.message.as_str())
        .collect();
    assert_eq!(children, ["1 spike detected in FC.", "No spikes detected in TA."]);
}

#[test]
fn spike_detection_drops_non_finite_cells() {
    let (starts, _) = half_hourly(40);
    let flux: Vec<String> = (0..40)
        .map(|i| match i {
            5 => "NaN".to_string(),
            6 => "inf".to_string(),
            20 => "40".to_string(),
            _ => noise(i).to_string(),
        })
        .collect();
    let data = dataset(&[(TIMESTAMP_START, starts), ("FC", flux)]);

    let logs = SpikeDetectionCheck.evaluate(&data, 4.0);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].subjects(), vec!["201801011000"]);
}

#[test]
fn spike_detection_skips_missing_rows_and_flag_columns() {
    let (starts, _) = half_hourly(12);
    let mut values: Vec<String> = vec!["0".to_string(); 12];
    values[6] = "10".to_string();
    values[2] = "-9999".to_string();
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("FC", values),
        ("FC_F", vec!["1".to_string(); 12]),
        ("P", vec!["-9999".to_string(); 12]),
    ]);
    let logs = SpikeDetectionCheck.evaluate(&data, 4.0);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].scope(), "FC");
    assert_eq!(logs[0].len(), 1);
}

#[test]
fn unknown_variable_names_are_errors() {
    let (starts, _) = half_hourly(1);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA_1_1_1", strings(&["1"])),
        ("TA_F_1_1_1", strings(&["1"])),
        ("TEMP", strings(&["1"])),
    ]);
    let statuses = run_check(
        &VariableNamesCheck,
        &data,
        &dictionary(&["TA"]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Error);
    assert_eq!(statuses[0].list(), ["TEMP".to_string()]);
}

#[test]
fn non_numeric_values_are_errors() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["1.5", "warm", "-9999"])),
        ("P", strings(&["0", "0.2", "1e-3"])),
    ]);
    let statuses = run_check(
        &DataTypeCheck,
        &data,
        &dictionary(&["TA", "P"]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Error);
    assert_eq!(statuses[0].list(), ["TA".to_string()]);
    assert_eq!(
        statuses[0].message,
        "1 variable with non-numeric values: TA."
    );
}

#[test]
fn non_finite_spellings_are_non_numeric() {
    let (starts, _) = half_hourly(3);
    let data = dataset(&[
        (TIMESTAMP_START, starts),
        ("TA", strings(&["NaN", "inf", "1"])),
        ("P", strings(&["0", "-Infinity", "0"])),
    ]);
    let statuses = run_check(
        &DataTypeCheck,
        &data,
        &dictionary(&["TA", "P"]),
        &CheckOptions::default(),
    );
    assert_eq!(statuses[0].severity, Severity::Error);
    assert_eq!(statuses[0].list(), ["TA".to_string(), "P".to_string()]);
}

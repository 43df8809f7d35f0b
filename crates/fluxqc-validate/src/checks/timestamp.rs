//! Timestamp format, uniqueness, and continuity.
//!
//! Rows are walked in file order and never reordered. A running expected
//! start advances by the file's resolution; a start that differs is a
//! cadence gap, after which the expectation re-syncs to the observed value.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use fluxqc_model::{
    Dataset, FindingLog, FindingPayload, Severity, Status, TIMESTAMP_END, TIMESTAMP_START,
    parse_f64,
};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext, CheckOptions};
use crate::error::CheckError;

pub const CHECK_ID: &str = "timestamp_continuity";
/// Digits in a `YYYYMMDDHHMM` timestamp.
pub const TIMESTAMP_LENGTH: usize = 12;
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Outcome of reading one timestamp cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampValue {
    Valid(NaiveDateTime),
    /// Integer with the wrong number of digits.
    WrongLength,
    /// Missing, not a number, or not a calendar date-time.
    Unparseable,
}

/// Length is checked on the trimmed text, so padded or decimal spellings of
/// a valid stamp are length mismatches.
pub fn parse_timestamp(raw: &str) -> TimestampValue {
    let trimmed = raw.trim();
    if parse_f64(trimmed).is_none() {
        return TimestampValue::Unparseable;
    }
    if trimmed.len() != TIMESTAMP_LENGTH {
        return TimestampValue::WrongLength;
    }
    if !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return TimestampValue::Unparseable;
    }
    match NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        Ok(stamp) => TimestampValue::Valid(stamp),
        Err(_) => TimestampValue::Unparseable,
    }
}

pub fn format_timestamp(stamp: NaiveDateTime) -> String {
    stamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Number of distinct values that occur more than once.
pub fn count_duplicate_groups<T: Ord>(values: &[T]) -> usize {
    let mut counts: BTreeMap<&T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts.values().filter(|&&count| count > 1).count()
}

/// Counts gathered over one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampReport {
    pub rows: usize,
    pub resolution_minutes: i64,
    pub length_mismatches: usize,
    pub cast_failures: usize,
    /// Duplicate group count per timestamp column.
    pub duplicate_groups: BTreeMap<String, usize>,
    pub cadence_gaps: usize,
    pub continuity_gaps: usize,
    pub unparseable_pairs: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampContinuityCheck;

impl TimestampContinuityCheck {
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        options: &CheckOptions,
        log: &mut FindingLog,
    ) -> Result<TimestampReport, CheckError> {
        let starts = dataset
            .values(TIMESTAMP_START)
            .ok_or_else(|| CheckError::data_shape(format!("missing column {TIMESTAMP_START}")))?;
        let ends = dataset
            .values(TIMESTAMP_END)
            .ok_or_else(|| CheckError::data_shape(format!("missing column {TIMESTAMP_END}")))?;

        let mut report = TimestampReport {
            rows: dataset.height(),
            ..TimestampReport::default()
        };
        let parsed_starts = parse_column(TIMESTAMP_START, &starts, &mut report, log);
        let parsed_ends = parse_column(TIMESTAMP_END, &ends, &mut report, log);

        for (column, values) in [(TIMESTAMP_START, &starts), (TIMESTAMP_END, &ends)] {
            let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
            let groups = count_duplicate_groups(&present);
            if groups > 0 {
                log.record(
                    Severity::Error,
                    FindingPayload::DuplicateTimestamps {
                        column: column.to_string(),
                        groups: groups as u64,
                    },
                );
            }
            report.duplicate_groups.insert(column.to_string(), groups);
        }

        report.resolution_minutes = parsed_starts
            .iter()
            .zip(&parsed_ends)
            .find_map(|pair| match pair {
                (Some(start), Some(end)) if end > start => Some((*end - *start).num_minutes()),
                _ => None,
            })
            .unwrap_or(options.default_resolution_minutes);
        let resolution = report.resolution_minutes;
        let step = TimeDelta::try_minutes(resolution).ok_or_else(|| {
            CheckError::data_shape(format!("resolution of {resolution} minutes is out of range"))
        })?;
        let advance = |stamp: NaiveDateTime| {
            stamp.checked_add_signed(step).ok_or_else(|| {
                CheckError::data_shape(format!(
                    "{} plus {resolution} minutes is out of range",
                    format_timestamp(stamp)
                ))
            })
        };

        let mut expected: Option<NaiveDateTime> = None;
        for (row, start) in parsed_starts.iter().enumerate() {
            match (expected, start) {
                (Some(want), Some(found)) => {
                    if *found != want {
                        report.cadence_gaps += 1;
                        log.record(
                            Severity::Error,
                            FindingPayload::CadenceGap {
                                row,
                                expected: format_timestamp(want),
                                found: format_timestamp(*found),
                            },
                        );
                    }
                    expected = Some(advance(*found)?);
                }
                (None, Some(found)) => expected = Some(advance(*found)?),
                (Some(want), None) => expected = Some(advance(want)?),
                (None, None) => {}
            }
        }

        for row in 0..report.rows.saturating_sub(1) {
            let end = ends[row].clone().unwrap_or_default();
            let next_start = starts[row + 1].clone().unwrap_or_default();
            match (parsed_ends[row], parsed_starts[row + 1]) {
                (Some(a), Some(b)) if a == b => {}
                (Some(_), Some(_)) => {
                    report.continuity_gaps += 1;
                    log.record(
                        Severity::Error,
                        FindingPayload::ContinuityGap {
                            row,
                            end,
                            next_start,
                        },
                    );
                }
                _ => {
                    report.unparseable_pairs += 1;
                    log.record(
                        Severity::Error,
                        FindingPayload::ContinuityUnparseable {
                            row,
                            end,
                            next_start,
                        },
                    );
                }
            }
        }
        Ok(report)
    }
}

fn parse_column(
    column: &str,
    values: &[Option<String>],
    report: &mut TimestampReport,
    log: &mut FindingLog,
) -> Vec<Option<NaiveDateTime>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let raw = value.clone().unwrap_or_default();
            match parse_timestamp(&raw) {
                TimestampValue::Valid(stamp) => Some(stamp),
                TimestampValue::WrongLength => {
                    report.length_mismatches += 1;
                    log.record(
                        Severity::Error,
                        FindingPayload::TimestampLength {
                            column: column.to_string(),
                            row,
                            value: raw,
                        },
                    );
                    None
                }
                TimestampValue::Unparseable => {
                    report.cast_failures += 1;
                    log.record(
                        Severity::Error,
                        FindingPayload::TimestampCast {
                            column: column.to_string(),
                            row,
                            value: raw,
                        },
                    );
                    None
                }
            }
        })
        .collect()
}

impl Check for TimestampContinuityCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let mut log = FindingLog::new(CHECK_ID);
        let report = self.evaluate(ctx.dataset, ctx.options, &mut log)?;
        debug!(
            rows = report.rows,
            resolution = report.resolution_minutes,
            cadence_gaps = report.cadence_gaps,
            continuity_gaps = report.continuity_gaps,
            "timestamps evaluated"
        );
        Ok(vec![ctx.builder.single_list(CHECK_ID, log, &MessageArgs::new())?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_length_timestamps() {
        let TimestampValue::Valid(stamp) = parse_timestamp("201801010030") else {
            panic!("expected valid timestamp");
        };
        assert_eq!(format_timestamp(stamp), "201801010030");
        assert!(matches!(
            parse_timestamp(" 201801010030 "),
            TimestampValue::Valid(_)
        ));
    }

    #[test]
    fn wrong_length_and_cast_failures_differ() {
        assert_eq!(parse_timestamp("2018010100"), TimestampValue::WrongLength);
        assert_eq!(parse_timestamp("0"), TimestampValue::WrongLength);
        assert_eq!(parse_timestamp("2018-01-01"), TimestampValue::Unparseable);
        assert_eq!(parse_timestamp(""), TimestampValue::Unparseable);
        assert_eq!(parse_timestamp("201813010000"), TimestampValue::Unparseable);
        assert_eq!(parse_timestamp("0201801010030"), TimestampValue::WrongLength);
        assert_eq!(parse_timestamp("201801010030.0"), TimestampValue::WrongLength);
        assert_eq!(parse_timestamp("20180101003."), TimestampValue::Unparseable);
    }

    #[test]
    fn duplicate_groups() {
        assert_eq!(count_duplicate_groups(&[1, 1, 2]), 1);
        assert_eq!(count_duplicate_groups(&[1, 1, 2, 2, 3]), 2);
        assert_eq!(count_duplicate_groups(&[1, 1, 1]), 1);
        assert_eq!(count_duplicate_groups::<i32>(&[]), 0);
    }
}

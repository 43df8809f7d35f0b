//! Fully missing variable detection.
//!
//! A column is fully missing when the only present/missing state it shows
//! is "missing". An empty dataset therefore counts every column as missing.

use std::collections::BTreeSet;

use tracing::debug;

use fluxqc_model::{Dataset, FindingLog, FindingPayload, Severity, Status};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext};
use crate::error::CheckError;

pub const CHECK_ID: &str = "missing_data";
/// Extra status emitted when every data column is missing.
pub const ALL_MISSING_CHECK_ID: &str = "all_data_missing";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingDataResult {
    /// Fully missing headers in header order.
    pub missing_columns: Vec<String>,
    /// Non-timestamp columns evaluated.
    pub total_columns: usize,
}

impl MissingDataResult {
    pub fn all_missing(&self) -> bool {
        self.total_columns > 0 && self.missing_columns.len() == self.total_columns
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MissingDataCheck;

impl MissingDataCheck {
    pub fn evaluate(&self, dataset: &Dataset, log: &mut FindingLog) -> MissingDataResult {
        let mut result = MissingDataResult::default();
        for column in dataset.data_columns() {
            let Some(mask) = dataset.missing_mask(&column) else {
                continue;
            };
            result.total_columns += 1;
            let states: BTreeSet<bool> = mask.into_iter().collect();
            if !states.contains(&false) {
                log.record(
                    Severity::Warning,
                    FindingPayload::ColumnAllMissing {
                        column: column.clone(),
                    },
                );
                result.missing_columns.push(column);
            }
        }
        result
    }
}

impl Check for MissingDataCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let mut log = FindingLog::new(CHECK_ID);
        let result = self.evaluate(ctx.dataset, &mut log);
        debug!(
            missing = result.missing_columns.len(),
            total = result.total_columns,
            "missing data evaluated"
        );

        let mut statuses = vec![ctx.builder.single_list(CHECK_ID, log, &MessageArgs::new())?];
        if result.all_missing() {
            let args = MessageArgs::new().with("total", result.total_columns);
            statuses.push(
                ctx.builder
                    .single_msg(ALL_MISSING_CHECK_ID, Severity::Warning, &args)?,
            );
        }
        Ok(statuses)
    }
}

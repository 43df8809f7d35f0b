//! Numeric content of data columns.
//!
//! Missing cells are ignored; every other cell must parse as a number.

use tracing::debug;

use fluxqc_model::{Dataset, FindingLog, FindingPayload, Severity, Status, parse_f64};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext};
use crate::error::CheckError;

pub const CHECK_ID: &str = "data_type";
/// Offending values kept per column.
pub const MAX_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct DataTypeCheck;

impl DataTypeCheck {
    pub fn evaluate(&self, dataset: &Dataset, log: &mut FindingLog) {
        for column in dataset.data_columns() {
            let Some(values) = dataset.values(&column) else {
                continue;
            };
            let offending: Vec<String> = values
                .into_iter()
                .flatten()
                .filter(|value| parse_f64(value).is_none())
                .collect();
            if offending.is_empty() {
                continue;
            }
            let count = offending.len() as u64;
            let mut samples: Vec<String> = Vec::new();
            for value in offending {
                if samples.len() == MAX_SAMPLES {
                    break;
                }
                if !samples.contains(&value) {
                    samples.push(value);
                }
            }
            log.record(
                Severity::Error,
                FindingPayload::NonNumeric {
                    column,
                    count,
                    samples,
                },
            );
        }
    }
}

impl Check for DataTypeCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let mut log = FindingLog::new(CHECK_ID);
        self.evaluate(ctx.dataset, &mut log);
        debug!(columns = log.len(), "data types evaluated");
        Ok(vec![ctx.builder.single_list(CHECK_ID, log, &MessageArgs::new())?])
    }
}

#[cfg(test)]
mod tests {
    use fluxqc_model::Dataset;
    use polars::prelude::{Column, DataFrame};

    use super::*;

    #[test]
    fn samples_are_distinct_and_capped() {
        let cells = ["a", "a", "1.0", "b", "c", "d", "e", "f", "-9999"];
        let df = DataFrame::new(vec![Column::new("TA".into(), cells)]).unwrap();
        let dataset = Dataset::new("site", df);
        let mut log = FindingLog::new(CHECK_ID);
        DataTypeCheck.evaluate(&dataset, &mut log);

        assert_eq!(log.len(), 1);
        let FindingPayload::NonNumeric { count, samples, .. } = &log.findings()[0].payload else {
            panic!("expected non-numeric finding");
        };
        assert_eq!(*count, 7);
        assert_eq!(samples, &vec!["a", "b", "c", "d", "e"]);
    }
}

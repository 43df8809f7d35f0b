//! Header names against the variable dictionary.

use tracing::debug;

use fluxqc_model::{Dataset, FindingLog, FindingPayload, Severity, Status, VariableDictionary};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext};
use crate::error::CheckError;

pub const CHECK_ID: &str = "variable_names";

#[derive(Debug, Clone, Copy, Default)]
pub struct VariableNamesCheck;

impl VariableNamesCheck {
    /// Record every data column whose base name the dictionary does not
    /// know. Returns the number of columns examined.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        dictionary: &dyn VariableDictionary,
        log: &mut FindingLog,
    ) -> usize {
        let variables = dataset.variables();
        let columns = dataset.data_columns();
        for column in &columns {
            let known = variables
                .parts(column)
                .is_some_and(|parts| dictionary.contains(&parts.base));
            if !known {
                log.record(
                    Severity::Error,
                    FindingPayload::UnknownVariable {
                        column: column.clone(),
                    },
                );
            }
        }
        columns.len()
    }
}

impl Check for VariableNamesCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let mut log = FindingLog::new(CHECK_ID);
        let examined = self.evaluate(ctx.dataset, ctx.dictionary, &mut log);
        debug!(examined, unknown = log.len(), "variable names evaluated");
        Ok(vec![ctx.builder.single_list(CHECK_ID, log, &MessageArgs::new())?])
    }
}

//! Gap-fill detection.
//!
//! Each dictionary variable is paired with its `_F` quality-flag companion.
//! A variable with gaps counts as filled only when the companion is present
//! on every row where the raw value is missing. In `base` mode a mandatory
//! variable with no column at all is an error as well.

use serde::Serialize;
use tracing::debug;

use fluxqc_model::{Dataset, FindingLog, FindingPayload, Severity, Status, VariableDictionary};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext, CheckOptions, ValidationMode};
use crate::error::CheckError;

pub const CHECK_ID: &str = "gap_fill";

/// One position of a gap-fill result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GapSlot {
    Variable(String),
    /// Position applies to the variable but holds no name (`''`).
    Empty,
    /// Position does not apply (`none`).
    NoValue,
}

/// Fixed-shape result for one variable.
///
/// `no_gaps` names a gap-free variable handled with the regular rules,
/// `mandatory` names a gap-free mandatory variable in `base` mode, and
/// `filled` names the flag companion that covers every gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapFillResult {
    pub no_gaps: GapSlot,
    pub mandatory: GapSlot,
    pub filled: GapSlot,
}

/// Classification of one variable's gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapClass {
    NoGaps,
    Filled { gaps: usize },
    /// Flag companion exists but misses `uncovered` of the gaps.
    PartiallyFilled { gaps: usize, uncovered: usize },
    /// No flag companion.
    Unfilled { gaps: usize },
}

/// Evaluation of one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableGapFill {
    pub variable: String,
    pub flag: Option<String>,
    pub mandatory: bool,
    pub class: GapClass,
    pub result: GapFillResult,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GapFillCheck;

impl GapFillCheck {
    /// Classify a raw column against its optional flag column, both given
    /// as per-row missing flags.
    pub fn classify(raw_missing: &[bool], flag_missing: Option<&[bool]>) -> GapClass {
        let gaps = raw_missing.iter().filter(|&&missing| missing).count();
        if gaps == 0 {
            return GapClass::NoGaps;
        }
        let Some(flag_missing) = flag_missing else {
            return GapClass::Unfilled { gaps };
        };
        let uncovered = raw_missing
            .iter()
            .zip(flag_missing)
            .filter(|&(&raw, &flag)| raw && flag)
            .count();
        if uncovered == 0 {
            GapClass::Filled { gaps }
        } else {
            GapClass::PartiallyFilled { gaps, uncovered }
        }
    }

    /// Result slots for a classified variable. `format` mode treats every
    /// variable as non-mandatory.
    pub fn slots(
        variable: &str,
        flag: Option<&str>,
        class: GapClass,
        mandatory: bool,
        mode: ValidationMode,
    ) -> GapFillResult {
        match (class, flag) {
            (GapClass::NoGaps, _) if mandatory && mode == ValidationMode::Base => GapFillResult {
                no_gaps: GapSlot::Empty,
                mandatory: GapSlot::Variable(variable.to_string()),
                filled: GapSlot::NoValue,
            },
            (GapClass::NoGaps, _) => GapFillResult {
                no_gaps: GapSlot::Variable(variable.to_string()),
                mandatory: GapSlot::Empty,
                filled: GapSlot::NoValue,
            },
            (GapClass::Filled { .. }, Some(flag)) => GapFillResult {
                no_gaps: GapSlot::NoValue,
                mandatory: GapSlot::NoValue,
                filled: GapSlot::Variable(flag.to_string()),
            },
            _ => GapFillResult {
                no_gaps: GapSlot::NoValue,
                mandatory: GapSlot::NoValue,
                filled: GapSlot::NoValue,
            },
        }
    }

    /// Evaluate every non-flag column whose base variable the dictionary knows,
    /// then, in `base` mode, record mandatory variables the file lacks.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        dictionary: &dyn VariableDictionary,
        options: &CheckOptions,
        log: &mut FindingLog,
    ) -> Vec<VariableGapFill> {
        let strict = options.mode == ValidationMode::Base;
        let variables = dataset.variables();
        let mut evaluated = Vec::new();
        for column in dataset.data_columns() {
            let Some(parts) = variables.parts(&column) else {
                continue;
            };
            if parts.is_flag() || !dictionary.contains(&parts.base) {
                continue;
            }
            let Some(raw_missing) = dataset.missing_mask(&column) else {
                continue;
            };
            let flag = variables.flag_companion(&column).map(str::to_string);
            let flag_missing = flag.as_deref().and_then(|name| dataset.missing_mask(name));
            let class = Self::classify(&raw_missing, flag_missing.as_deref());
            let mandatory = options.is_mandatory(&parts.base);

            match class {
                GapClass::Unfilled { gaps } | GapClass::PartiallyFilled { gaps, .. }
                    if strict && mandatory =>
                {
                    log.record(
                        Severity::Error,
                        FindingPayload::GapsUnfilled {
                            variable: column.clone(),
                            gap_count: gaps as u64,
                        },
                    );
                }
                GapClass::PartiallyFilled { uncovered, .. } => {
                    log.record(
                        Severity::Warning,
                        FindingPayload::PartialFill {
                            variable: column.clone(),
                            flag: flag.clone().unwrap_or_default(),
                            uncovered: uncovered as u64,
                        },
                    );
                }
                _ => {}
            }

            let result = Self::slots(&column, flag.as_deref(), class, mandatory, options.mode);
            evaluated.push(VariableGapFill {
                variable: column,
                flag,
                mandatory,
                class,
                result,
            });
        }
        if strict {
            for variable in Self::absent_mandatory(dataset, options) {
                log.record(Severity::Error, FindingPayload::MandatoryMissing { variable });
            }
        }
        evaluated
    }

    /// Mandatory variables with no non-flag column of that base.
    pub fn absent_mandatory(dataset: &Dataset, options: &CheckOptions) -> Vec<String> {
        let variables = dataset.variables();
        options
            .mandatory_variables
            .iter()
            .filter(|name| {
                !variables
                    .iter()
                    .any(|parts| !parts.is_flag() && parts.base.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect()
    }
}

impl Check for GapFillCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let mut log = FindingLog::new(CHECK_ID);
        let evaluated = self.evaluate(ctx.dataset, ctx.dictionary, ctx.options, &mut log);
        debug!(
            variables = evaluated.len(),
            mode = ctx.options.mode.as_str(),
            findings = log.len(),
            "gap filling evaluated"
        );
        Ok(vec![ctx.builder.single_list(CHECK_ID, log, &MessageArgs::new())?])
    }
}

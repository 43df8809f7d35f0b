//! Built-in checks.
//!
//! Each module exposes a typed `evaluate` entry point that records into a
//! caller-supplied finding log, plus a [`Check`] implementation that turns
//! the log into statuses.

pub mod data_type;
pub mod gap_fill;
pub mod missing_data;
pub mod spike;
pub mod timestamp;
pub mod variable_names;

pub use data_type::DataTypeCheck;
pub use gap_fill::GapFillCheck;
pub use missing_data::MissingDataCheck;
pub use spike::SpikeDetectionCheck;
pub use timestamp::TimestampContinuityCheck;
pub use variable_names::VariableNamesCheck;

use crate::check::Check;

/// Every built-in check in report order.
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(TimestampContinuityCheck),
        Box::new(VariableNamesCheck),
        Box::new(DataTypeCheck),
        Box::new(MissingDataCheck),
        Box::new(GapFillCheck),
        Box::new(SpikeDetectionCheck),
    ]
}

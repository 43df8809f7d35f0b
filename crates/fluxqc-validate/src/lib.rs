#![deny(unsafe_code)]

mod builder;
mod check;
pub mod checks;
mod error;
mod runner;

pub use builder::{MessageArgs, StatusBuilder, plural, render_template};
pub use check::{
    Check, CheckContext, CheckOptions, DEFAULT_MANDATORY_VARIABLES, MAX_RESOLUTION_MINUTES,
    ValidationMode,
};
pub use checks::{
    DataTypeCheck, GapFillCheck, MissingDataCheck, SpikeDetectionCheck,
    TimestampContinuityCheck, VariableNamesCheck, default_checks,
};
pub use error::{CheckError, StatusError};
pub use runner::CheckRunner;

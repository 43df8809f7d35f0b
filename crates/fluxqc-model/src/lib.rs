#![deny(unsafe_code)]

pub mod dataset;
pub mod dictionary;
pub mod finding;
pub mod severity;
pub mod status;
pub mod value;
pub mod variable;

pub use dataset::{Dataset, MISSING_SENTINEL, TIMESTAMP_END, TIMESTAMP_START, is_reserved_header};
pub use dictionary::{InMemoryDictionary, VariableDictionary, VariableInfo};
pub use finding::{Finding, FindingLog, FindingPayload, SeveritySummary};
pub use severity::Severity;
pub use status::{Status, StatusDetail};
pub use value::{any_to_string, format_numeric, is_missing_value, parse_f64};
pub use variable::{FLAG_SUFFIX, HeaderParts, VariableMap};

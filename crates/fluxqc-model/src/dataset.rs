//! Dataset snapshot consumed by the checks.

use polars::prelude::{AnyValue, DataFrame};

use crate::value::{any_to_string, is_missing_value};
use crate::variable::VariableMap;

pub const TIMESTAMP_START: &str = "TIMESTAMP_START";
pub const TIMESTAMP_END: &str = "TIMESTAMP_END";
pub const MISSING_SENTINEL: &str = "-9999";

/// True for the reserved timestamp headers.
pub fn is_reserved_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(TIMESTAMP_START) || name.eq_ignore_ascii_case(TIMESTAMP_END)
}

/// One file's rows in timestamp order plus its header-normalization map.
///
/// Read-only once built; every check borrows the same snapshot.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    frame: DataFrame,
    variables: VariableMap,
}

impl Dataset {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        let variables = VariableMap::from_headers(frame.get_column_names());
        Self {
            name: name.into(),
            frame,
            variables,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn headers(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Headers other than the reserved timestamp columns.
    pub fn data_columns(&self) -> Vec<String> {
        self.headers()
            .into_iter()
            .filter(|name| !is_reserved_header(name))
            .collect()
    }

    /// Cell values with missing cells as `None`; `None` if the column does not exist.
    pub fn values(&self, column: &str) -> Option<Vec<Option<String>>> {
        let series = self.frame.column(column).ok()?;
        let values = (0..self.frame.height())
            .map(|idx| {
                let value = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
                if is_missing_value(&value) {
                    None
                } else {
                    Some(value.trim().to_string())
                }
            })
            .collect();
        Some(values)
    }

    /// Per-row missing flags for a column.
    pub fn missing_mask(&self, column: &str) -> Option<Vec<bool>> {
        self.values(column)
            .map(|values| values.iter().map(Option::is_none).collect())
    }
}

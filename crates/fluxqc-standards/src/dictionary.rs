//! CSV loader for the variable dictionary.

use std::path::Path;

use tracing::debug;

use fluxqc_model::{InMemoryDictionary, VariableInfo};

use crate::error::DictionaryError;
use crate::paths::dictionary_path;

const VARIABLE_COLUMN: &str = "Variable";
const UNITS_COLUMN: &str = "Units";
const DESCRIPTION_COLUMN: &str = "Description";

/// Load a `Variable,Units,Description` dictionary.
///
/// An unreadable or empty dictionary is an error: checks cannot run
/// without one.
pub fn load_dictionary(path: &Path) -> Result<InMemoryDictionary, DictionaryError> {
    let csv_error = |source: csv::Error| DictionaryError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let name_idx = find_column(&headers, VARIABLE_COLUMN, path)?;
    let unit_idx = find_column(&headers, UNITS_COLUMN, path)?;
    let description_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(DESCRIPTION_COLUMN));

    let mut dictionary = InMemoryDictionary::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        dictionary.insert(VariableInfo {
            name: name.to_string(),
            unit: record.get(unit_idx).unwrap_or("").to_string(),
            description: description_idx
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .to_string(),
        });
    }

    if dictionary.is_empty() {
        return Err(DictionaryError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), variables = dictionary.len(), "loaded variable dictionary");
    Ok(dictionary)
}

/// Load the bundled dictionary.
pub fn load_default_dictionary() -> Result<InMemoryDictionary, DictionaryError> {
    load_dictionary(&dictionary_path())
}

fn find_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, DictionaryError> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| DictionaryError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

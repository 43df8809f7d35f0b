//! CSV table reader.
//!
//! The first non-blank row is the header row. Every column is read as text;
//! blank cells and missing sentinels become nulls so checks see one missing
//! state regardless of spelling.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use fluxqc_model::{Dataset, MISSING_SENTINEL, is_missing_value};

use crate::error::{IngestError, Result};

/// Reader settings.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub delimiter: u8,
    /// Extra cell text treated as missing, in addition to blanks and `-9999`.
    pub missing_sentinel: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing_sentinel: MISSING_SENTINEL.to_string(),
        }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str, options: &IngestOptions) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed == options.missing_sentinel || is_missing_value(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a flux CSV file. The dataset is named after the file stem.
pub fn read_flux_table(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_flux_table_from_reader(&name, file, options)
}

/// Read flux CSV text from any reader.
pub fn read_flux_table_from_reader<R: Read>(
    name: &str,
    reader: R,
    options: &IngestOptions,
) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut headers: Option<Vec<String>> = None;
    let mut columns: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            name: name.to_string(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            let parsed = parse_headers(name, &record)?;
            columns = vec![Vec::new(); parsed.len()];
            headers = Some(parsed);
            continue;
        }
        if record.len() > columns.len() {
            let line = record.position().map_or(0, csv::Position::line);
            warn!(
                file = name,
                line,
                extra = record.len() - columns.len(),
                "row has more cells than headers; extra cells ignored"
            );
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(
                record
                    .get(idx)
                    .and_then(|value| normalize_cell(value, options)),
            );
        }
    }

    let Some(headers) = headers else {
        return Err(IngestError::EmptyCsv {
            name: name.to_string(),
        });
    };
    let rows = columns.first().map_or(0, Vec::len);
    let frame_columns: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(header, values)| Column::new(header.as_str().into(), values))
        .collect();
    let frame = DataFrame::new(frame_columns).map_err(|source| IngestError::Frame {
        name: name.to_string(),
        source,
    })?;
    debug!(file = name, rows, columns = headers.len(), "read flux table");
    Ok(Dataset::new(name, frame))
}

fn parse_headers(name: &str, record: &csv::StringRecord) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(record.len());
    for (index, raw) in record.iter().enumerate() {
        let header = normalize_header(raw);
        if header.is_empty() {
            return Err(IngestError::EmptyHeader {
                name: name.to_string(),
                index,
            });
        }
        if !seen.insert(header.clone()) {
            return Err(IngestError::DuplicateHeader {
                name: name.to_string(),
                header,
            });
        }
        headers.push(header);
    }
    Ok(headers)
}

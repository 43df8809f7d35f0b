//! Error types for flux table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a flux table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV {name}: {source}")]
    CsvParse {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// File has no header row.
    #[error("CSV file is empty: {name}")]
    EmptyCsv { name: String },

    // === Header Errors ===
    /// Header cell is blank.
    #[error("empty header in column {index} of {name}")]
    EmptyHeader { name: String, index: usize },

    /// Same header appears more than once.
    #[error("duplicate header '{header}' in {name}")]
    DuplicateHeader { name: String, header: String },

    // === Frame Errors ===
    /// Building the in-memory frame failed.
    #[error("failed to build data frame for {name}: {source}")]
    Frame {
        name: String,
        #[source]
        source: polars::error::PolarsError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

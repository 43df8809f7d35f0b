use std::path::PathBuf;

use fluxqc_model::Severity;

use crate::catalog::ReportKind;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse message table: {0}")]
    Csv(#[from] csv::Error),

    #[error("message table line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("message table line {line}: unknown severity '{value}'")]
    UnknownSeverity { line: u64, value: String },

    #[error("message table line {line}: unknown report kind '{value}'")]
    UnknownKind { line: u64, value: String },

    #[error("message table line {line}: duplicate entry for {check_id}/{severity}/{kind}")]
    DuplicateEntry {
        line: u64,
        check_id: String,
        severity: Severity,
        kind: ReportKind,
    },

    #[error("no message for {check_id}/{severity}/{kind}")]
    NotFound {
        check_id: String,
        severity: Severity,
        kind: ReportKind,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read variable dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse variable dictionary {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("variable dictionary {path} is missing column {column}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("variable dictionary {path} has no entries")]
    Empty { path: PathBuf },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

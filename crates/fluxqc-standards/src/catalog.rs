//! Message catalog loaded from the `;`-delimited message table.
//!
//! Each row is `check_id;display_name;severity;kind;message;report_prefix;report_suffix`.
//! A row with any other field count aborts the load; there is no partially
//! loaded catalog.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use fluxqc_model::Severity;

use crate::error::CatalogError;
use crate::paths::messages_path;

/// Fields per message table row.
pub const MESSAGE_FIELD_COUNT: usize = 7;

/// Shape of the status a message row renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    SingleMsg,
    SingleList,
    Composite,
}

impl ReportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single_msg" => Some(Self::SingleMsg),
            "single_list" => Some(Self::SingleList),
            "composite" => Some(Self::Composite),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleMsg => "single_msg",
            Self::SingleList => "single_list",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub check_id: String,
    pub display_name: String,
    pub severity: Severity,
    pub kind: ReportKind,
    pub message: String,
    pub report_prefix: String,
    pub report_suffix: String,
}

type EntryKey = (String, Severity, ReportKind);

/// Immutable lookup of message templates and display names.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: Vec<MessageEntry>,
    index: HashMap<EntryKey, usize>,
    display_names: HashMap<String, String>,
}

impl MessageCatalog {
    /// Parse a message table. An optional header row starting with
    /// `check_id` is skipped, as are blank and `#` comment lines.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut catalog = Self::default();
        let mut first_row = true;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            if record.iter().all(str::is_empty) {
                continue;
            }
            if std::mem::take(&mut first_row)
                && record
                    .get(0)
                    .is_some_and(|field| field.eq_ignore_ascii_case("check_id"))
            {
                continue;
            }
            if record.len() != MESSAGE_FIELD_COUNT {
                return Err(CatalogError::FieldCount {
                    line,
                    expected: MESSAGE_FIELD_COUNT,
                    found: record.len(),
                });
            }
            let field = |i: usize| record.get(i).unwrap_or("").to_string();
            let severity =
                Severity::parse(&record[2]).ok_or_else(|| CatalogError::UnknownSeverity {
                    line,
                    value: field(2),
                })?;
            let kind = ReportKind::parse(&record[3]).ok_or_else(|| CatalogError::UnknownKind {
                line,
                value: field(3),
            })?;
            catalog.insert(
                line,
                MessageEntry {
                    check_id: field(0),
                    display_name: field(1),
                    severity,
                    kind,
                    message: field(4),
                    report_prefix: field(5),
                    report_suffix: field(6),
                },
            )?;
        }
        debug!(entries = catalog.len(), "loaded message catalog");
        Ok(catalog)
    }

    fn insert(&mut self, line: u64, entry: MessageEntry) -> Result<(), CatalogError> {
        let key = (entry.check_id.clone(), entry.severity, entry.kind);
        if self.index.contains_key(&key) {
            return Err(CatalogError::DuplicateEntry {
                line,
                check_id: entry.check_id,
                severity: entry.severity,
                kind: entry.kind,
            });
        }
        self.display_names
            .entry(entry.check_id.clone())
            .or_insert_with(|| entry.display_name.clone());
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Template row for a check outcome. A miss means a check and the
    /// message table have drifted apart.
    pub fn get_message(
        &self,
        check_id: &str,
        severity: Severity,
        kind: ReportKind,
    ) -> Result<&MessageEntry, CatalogError> {
        self.index
            .get(&(check_id.to_string(), severity, kind))
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| CatalogError::NotFound {
                check_id: check_id.to_string(),
                severity,
                kind,
            })
    }

    /// First display name seen for `check_id`.
    pub fn get_display_name(&self, check_id: &str) -> Option<&str> {
        self.display_names.get(check_id).map(String::as_str)
    }

    /// Rows in table order.
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load a message table from disk.
pub fn load_catalog(path: &Path) -> Result<MessageCatalog, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::io(path, source))?;
    MessageCatalog::from_reader(file)
}

/// Load the bundled message table.
pub fn load_default_catalog() -> Result<MessageCatalog, CatalogError> {
    load_catalog(&messages_path())
}

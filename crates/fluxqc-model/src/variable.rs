//! Header normalization.
//!
//! Raw flux headers carry a base variable name, an optional processing
//! suffix, and an optional positional qualifier: `SWC_F_1_1_1` is base
//! `SWC`, suffix `F`, qualifier `_1_1_1`. The `F` suffix marks the
//! quality-flag companion of the variable with the same base and qualifier.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Suffix marking a quality-flag companion column.
pub const FLAG_SUFFIX: &str = "F";

/// Base is matched lazily so known suffixes and `_<n>` groups peel off the end.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<base>[A-Za-z][A-Za-z0-9]*(?:_[A-Za-z][A-Za-z0-9]*)*?)(?:_(?P<suffix>F|PI|QC|SD|N|IU))?(?P<qualifier>(?:_[0-9]+)*)$",
    )
    .expect("Invalid header regex")
});

/// A header split into its naming parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParts {
    pub raw: String,
    pub base: String,
    pub suffix: Option<String>,
    pub qualifier: String,
}

impl HeaderParts {
    /// Split a raw header. Headers that do not follow the naming
    /// convention keep the whole header as their base.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match HEADER_REGEX.captures(trimmed) {
            Some(caps) => Self {
                raw: trimmed.to_string(),
                base: caps["base"].to_uppercase(),
                suffix: caps.name("suffix").map(|m| m.as_str().to_string()),
                qualifier: caps
                    .name("qualifier")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            },
            None => Self {
                raw: trimmed.to_string(),
                base: trimmed.to_uppercase(),
                suffix: None,
                qualifier: String::new(),
            },
        }
    }

    pub fn is_flag(&self) -> bool {
        self.suffix.as_deref() == Some(FLAG_SUFFIX)
    }

    /// Name the quality-flag companion of this column would carry.
    pub fn flag_name(&self) -> String {
        format!("{}_{}{}", self.base, FLAG_SUFFIX, self.qualifier)
    }
}

/// Header-normalization map for one dataset.
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    columns: Vec<HeaderParts>,
    by_name: BTreeMap<String, usize>,
}

impl VariableMap {
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for header in headers {
            let parts = HeaderParts::parse(header.as_ref());
            map.by_name.insert(parts.raw.clone(), map.columns.len());
            map.columns.push(parts);
        }
        map
    }

    pub fn parts(&self, column: &str) -> Option<&HeaderParts> {
        self.by_name.get(column).map(|&idx| &self.columns[idx])
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_name.contains_key(column)
    }

    /// Quality-flag companion column for `column`, when the dataset has one.
    pub fn flag_companion(&self, column: &str) -> Option<&str> {
        let parts = self.parts(column)?;
        if parts.is_flag() {
            return None;
        }
        let flag = parts.flag_name();
        self.by_name
            .get(&flag)
            .map(|&idx| self.columns[idx].raw.as_str())
    }

    /// Base variable name to the columns implementing it, in header order.
    pub fn columns_by_base(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut bases: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for parts in &self.columns {
            bases
                .entry(parts.base.as_str())
                .or_default()
                .push(parts.raw.as_str());
        }
        bases
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderParts> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

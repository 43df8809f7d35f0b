//! Variable dictionary contract.

use std::collections::BTreeMap;

/// Lookup of canonical variable names.
pub trait VariableDictionary {
    /// Expected unit of a canonical variable, `None` when the name is unknown.
    fn lookup(&self, name: &str) -> Option<&str>;

    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// One dictionary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    pub unit: String,
    pub description: String,
}

/// Dictionary held in memory; names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDictionary {
    entries: BTreeMap<String, VariableInfo>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts replace earlier entries with the same name.
    pub fn insert(&mut self, info: VariableInfo) {
        self.entries.insert(info.name.to_uppercase(), info);
    }

    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.entries.get(&name.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableInfo> {
        self.entries.values()
    }
}

impl FromIterator<VariableInfo> for InMemoryDictionary {
    fn from_iter<T: IntoIterator<Item = VariableInfo>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for info in iter {
            dictionary.insert(info);
        }
        dictionary
    }
}

impl VariableDictionary for InMemoryDictionary {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|info| info.unit.as_str())
    }
}

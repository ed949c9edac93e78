//! In-memory record source.

use std::collections::HashMap;

use serde_json::Value;

use super::RecordSource;
use crate::model::record::RawRecord;

/// Named record lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<RawRecord>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Non-object values are dropped, as a bundle file would drop them.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        self.insert(name, records);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, records: Vec<Value>) {
        let records = records
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.files.insert(name.into(), records);
    }
}

impl RecordSource for MemorySource {
    fn load_records(&self, name: &str) -> Option<Vec<RawRecord>> {
        self.files.get(name).cloned()
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{RecordSource, SourceError, SourceResult};

/// Struct dumps held in memory, keyed by `(mapping, key)`.
#[derive(Default)]
pub struct InMemoryRecordSource {
    records: RwLock<HashMap<(String, String), String>>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mapping: &str, key: &str, dump: &str) -> SourceResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        records.insert((mapping.to_string(), key.to_string()), dump.to_string());
        Ok(())
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch(&self, mapping: &str, key: &str) -> SourceResult<Option<String>> {
        let records = self
            .records
            .read()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(records
            .get(&(mapping.to_string(), key.to_string()))
            .cloned())
    }
}

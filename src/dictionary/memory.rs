use super::{DurableDictionary, ensure_writable_key};
use crate::core::{Result, StoreError};
use crate::migration::MigrationLedger;
use serde_json::{Map, Value};

/// In-process dictionary with the same semantics as the file engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    document: Map<String, Value>,
    writes: usize,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the dictionary with `document`, migrating it with `ledger` first.
    pub fn with_document(document: Value, ledger: &MigrationLedger) -> Result<Self> {
        let outcome = ledger.migrate_document(document)?;
        match outcome.document {
            Value::Object(document) => Ok(Self {
                document,
                writes: 0,
            }),
            _ => Err(StoreError::Migration(
                "Document root must be a JSON object".to_string(),
            )),
        }
    }

    /// Returns a copy of the whole document.
    pub fn document(&self) -> Value {
        Value::Object(self.document.clone())
    }

    /// Number of successful `set`/`delete` calls that changed the document.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DurableDictionary for MemoryDictionary {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.document.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        ensure_writable_key(key)?;
        self.document.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        ensure_writable_key(key)?;
        if self.document.remove(key).is_some() {
            self.writes += 1;
        }
        Ok(())
    }
}

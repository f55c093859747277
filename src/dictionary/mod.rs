//! Durable key/value dictionaries backing the cluster store.
//!
//! A dictionary is a flat mapping from string keys to JSON values. Keys are
//! always literal: `"a.b"` is one top-level key, never a path into `"a"`.
//!
//! - `file.rs` - single JSON document on disk, atomic replace on every write
//! - `memory.rs` - in-process document, used by tests and embedders

mod file;
mod memory;

pub use file::JsonFileDictionary;
pub use memory::MemoryDictionary;

use crate::core::{Result, StoreError};
use crate::migration::INTERNAL_KEY;
use serde_json::Value;

pub trait DurableDictionary {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Writes `value` under `key`. Durable once this returns.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Returns the value stored under `key`, or `default` when absent.
    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Returns `true` for keys callers may not write or delete.
pub fn is_reserved_key(key: &str) -> bool {
    key == INTERNAL_KEY
}

pub(crate) fn ensure_writable_key(key: &str) -> Result<()> {
    if is_reserved_key(key) {
        return Err(StoreError::ReservedKey(key.to_string()));
    }
    Ok(())
}

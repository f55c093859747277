//! The cluster record store.
//!
//! All records live in one array under [`CLUSTERS_KEY`] in a
//! [`DurableDictionary`]. Every call reads the array fresh and every mutation
//! writes the whole array back with a single `set`; nothing is cached between
//! calls. The array is edited as raw JSON so that entries this version does
//! not fully understand are written back untouched unless they are the ones
//! being replaced.

use crate::cluster::{ClusterEntity, ClusterRecord};
use crate::config::{StoreConfig, UpsertOrdering};
use crate::core::{Result, StoreError};
use crate::dictionary::{DurableDictionary, JsonFileDictionary, is_reserved_key};
use crate::migration::MigrationLedger;
use serde_json::Value;
use tracing::{Level, event, info_span};

/// Top-level key holding the cluster collection.
pub const CLUSTERS_KEY: &str = "clusters";

pub struct ClusterStore<D = JsonFileDictionary> {
    dictionary: D,
    upsert_ordering: UpsertOrdering,
}

impl ClusterStore<JsonFileDictionary> {
    /// Opens the on-disk store described by `config`, migrating the document
    /// with `ledger` if it was written by an older schema version.
    pub fn open(config: &StoreConfig, ledger: &MigrationLedger) -> Result<Self> {
        let dictionary = JsonFileDictionary::open(config, ledger)?;
        Ok(Self::new(dictionary, config.upsert_ordering))
    }
}

impl<D: DurableDictionary> ClusterStore<D> {
    /// Wraps an already opened (and migrated) dictionary.
    pub fn new(dictionary: D, upsert_ordering: UpsertOrdering) -> Self {
        Self {
            dictionary,
            upsert_ordering,
        }
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn into_dictionary(self) -> D {
        self.dictionary
    }

    pub fn upsert_ordering(&self) -> UpsertOrdering {
        self.upsert_ordering
    }

    /// Reads the raw collection; an absent key is an empty collection.
    fn read_collection(&self) -> Result<Vec<Value>> {
        match self
            .dictionary
            .get_or(CLUSTERS_KEY, Value::Array(Vec::new()))?
        {
            Value::Array(entries) => Ok(entries),
            Value::Null => Ok(Vec::new()),
            other => Err(StoreError::MalformedRecord(format!(
                "'{}' must be an array, found {}",
                CLUSTERS_KEY, other
            ))),
        }
    }

    fn write_collection(&mut self, entries: Vec<Value>) -> Result<()> {
        self.dictionary.set(CLUSTERS_KEY, Value::Array(entries))
    }
}

impl<D> std::fmt::Debug for ClusterStore<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterStore")
            .field("upsert_ordering", &self.upsert_ordering)
            .finish_non_exhaustive()
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn entry_workspace(entry: &Value) -> Option<&str> {
    entry.get("workspace").and_then(Value::as_str)
}

fn position_of(entries: &[Value], id: &str) -> Option<usize> {
    entries.iter().position(|entry| entry_id(entry) == Some(id))
}

fn decode_record(index: usize, entry: Value) -> Result<ClusterRecord> {
    serde_json::from_value(entry)
        .map_err(|err| StoreError::MalformedRecord(format!("entry {}: {}", index, err)))
}

fn encode_record(record: &ClusterRecord) -> Result<Value> {
    Ok(serde_json::to_value(record)?)
}

// Keep store operations split by concern: reads, upserts, removals.
include!("read_paths.rs");
include!("write_paths.rs");
include!("delete_paths.rs");

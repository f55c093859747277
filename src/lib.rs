// ============================================================================
// clusterstore Library
// ============================================================================

pub mod cluster;
pub mod config;
pub mod core;
pub mod dictionary;
pub mod migration;
pub mod store;

// Re-export main types for convenience
pub use cluster::{Cluster, ClusterEntity, ClusterRecord};
pub use config::{StoreConfig, UpsertOrdering};
pub use core::{Result, StoreError};
pub use dictionary::{DurableDictionary, JsonFileDictionary, MemoryDictionary};
pub use migration::{
    DocumentTransform, INTERNAL_KEY, MigrationLedger, MigrationOutcome, MigrationStep,
    UNVERSIONED, stamped_version,
};
pub use store::{CLUSTERS_KEY, ClusterStore};

/// Store backed by a JSON document on disk.
pub type FileClusterStore = ClusterStore<JsonFileDictionary>;

/// Store backed by an in-process document.
pub type MemoryClusterStore = ClusterStore<MemoryDictionary>;

impl MemoryClusterStore {
    /// Creates an empty in-memory store with default settings.
    pub fn in_memory() -> Self {
        ClusterStore::new(MemoryDictionary::new(), UpsertOrdering::default())
    }
}

//! Versioned document migrations.
//!
//! A [`MigrationLedger`] is an ordered table of `version -> transform` pairs.
//! When a document is opened, every transform whose version is greater than
//! the version stamped in the document runs once, in ascending order, and
//! the document is re-stamped with the highest applied version.
//!
//! The stamp lives under the reserved [`INTERNAL_KEY`] as
//! `{"migrations": {"version": N}}`. Transforms never see that key.

use crate::core::{Result, StoreError};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{Level, event, info_span};

/// Top-level key reserved for store bookkeeping.
pub const INTERNAL_KEY: &str = "__internal__";

/// Version reported for documents that carry no stamp.
pub const UNVERSIONED: u32 = 0;

/// A pure, total transform from one document generation to the next.
pub type DocumentTransform = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A single registered migration.
#[derive(Clone)]
pub struct MigrationStep {
    pub version: u32,
    pub(crate) transform: DocumentTransform,
}

/// Ordered set of document migrations up to `current_version`.
#[derive(Debug, Clone)]
pub struct MigrationLedger {
    pub(crate) current_version: u32,
    pub(crate) steps: Vec<MigrationStep>,
}

/// Result of running a ledger over one document.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub document: Value,
    pub from_version: u32,
    pub to_version: u32,
    pub applied: Vec<u32>,
}

impl MigrationOutcome {
    /// Returns `true` when at least one transform ran.
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

// Keep ledger implementation split by concern, mirroring the write/read halves.
include!("step_builder_and_debug.rs");
include!("ledger_basics_and_validation.rs");
include!("ledger_execution.rs");

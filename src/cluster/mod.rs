//! Cluster records and the runtime entities built from them.
//!
//! - `record.rs` - the stored five-field shape
//! - `entity.rs` - projections between records and runtime entities

mod entity;
mod record;

pub use entity::{Cluster, ClusterEntity};
pub use record::ClusterRecord;

use super::ClusterRecord;
use serde_json::Value;

/// A runtime object that can be built from, and reduced to, a stored record.
pub trait ClusterEntity {
    /// Builds the entity from exactly the stored fields.
    fn from_record(record: ClusterRecord) -> Self
    where
        Self: Sized;

    /// Projects the entity to its storable shape, dropping runtime-only state.
    fn to_record(&self) -> ClusterRecord;

    /// Overwrites the mutable stored fields from `record`. `id` never changes.
    fn apply_record(&mut self, record: &ClusterRecord);

    fn id(&self) -> &str;
}

impl ClusterEntity for ClusterRecord {
    fn from_record(record: ClusterRecord) -> Self {
        record
    }

    fn to_record(&self) -> ClusterRecord {
        self.clone()
    }

    fn apply_record(&mut self, record: &ClusterRecord) {
        self.kube_config_path = record.kube_config_path.clone();
        self.context_name = record.context_name.clone();
        self.preferences = record.preferences.clone();
        self.workspace = record.workspace.clone();
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Live cluster handle.
///
/// Carries connection status next to the stored fields. Status is never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: String,
    pub kube_config_path: String,
    pub context_name: String,
    pub preferences: Value,
    pub workspace: String,
    pub online: bool,
    pub accessible: bool,
    pub failure_reason: Option<String>,
}

impl Cluster {
    /// Marks the cluster as unreachable.
    pub fn set_failure(&mut self, reason: impl Into<String>) {
        self.online = false;
        self.accessible = false;
        self.failure_reason = Some(reason.into());
    }

    /// Marks the cluster as reachable, clearing any previous failure.
    pub fn set_online(&mut self, accessible: bool) {
        self.online = true;
        self.accessible = accessible;
        self.failure_reason = None;
    }
}

impl ClusterEntity for Cluster {
    fn from_record(record: ClusterRecord) -> Self {
        let ClusterRecord {
            id,
            kube_config_path,
            context_name,
            preferences,
            workspace,
        } = record;
        Self {
            id,
            kube_config_path,
            context_name,
            preferences,
            workspace,
            online: false,
            accessible: false,
            failure_reason: None,
        }
    }

    fn to_record(&self) -> ClusterRecord {
        ClusterRecord {
            id: self.id.clone(),
            kube_config_path: self.kube_config_path.clone(),
            context_name: self.context_name.clone(),
            preferences: self.preferences.clone(),
            workspace: self.workspace.clone(),
        }
    }

    fn apply_record(&mut self, record: &ClusterRecord) {
        self.kube_config_path = record.kube_config_path.clone();
        self.context_name = record.context_name.clone();
        self.preferences = record.preferences.clone();
        self.workspace = record.workspace.clone();
    }

    fn id(&self) -> &str {
        &self.id
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Stored form of a cluster connection.
///
/// Field names on disk are camelCase. `preferences` is opaque and written back
/// as read, except that `null` and absent are the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    pub id: String,
    pub kube_config_path: String,
    pub context_name: String,
    /// An explicit `null` on disk is read as absent and saved without the key.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub preferences: Value,
    pub workspace: String,
}

impl ClusterRecord {
    pub fn new(
        id: impl Into<String>,
        kube_config_path: impl Into<String>,
        context_name: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kube_config_path: kube_config_path.into(),
            context_name: context_name.into(),
            preferences: Value::Null,
            workspace: workspace.into(),
        }
    }

    pub fn with_preferences(mut self, preferences: Value) -> Self {
        self.preferences = preferences;
        self
    }

    /// Generates a fresh identifier for a new cluster.
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

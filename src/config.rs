use serde::Deserialize;
use std::path::PathBuf;

/// Default document name, kept compatible with existing installations.
pub const DEFAULT_CONFIG_NAME: &str = "lens-cluster-store";

/// Default document extension.
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// How bulk saves treat records whose id is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOrdering {
    /// Replace the stored record where it sits; unseen ids are appended.
    #[default]
    PreservePosition,
    /// Remove the stored record, then append the new one at the end.
    MoveToEnd,
}

/// Cluster store configuration
///
/// Locates the backing document and selects write behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the document
    pub directory: PathBuf,

    /// Document file stem
    #[serde(default = "default_config_name")]
    pub config_name: String,

    /// Document file extension, without the leading dot
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Write tab-indented JSON instead of a single line
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Ordering policy for bulk saves
    #[serde(default)]
    pub upsert_ordering: UpsertOrdering,
}

fn default_config_name() -> String {
    DEFAULT_CONFIG_NAME.to_string()
}

fn default_file_extension() -> String {
    DEFAULT_FILE_EXTENSION.to_string()
}

fn default_pretty() -> bool {
    true
}

impl StoreConfig {
    /// Create a configuration rooted at `directory` with default settings
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            config_name: default_config_name(),
            file_extension: default_file_extension(),
            pretty: default_pretty(),
            upsert_ordering: UpsertOrdering::default(),
        }
    }

    /// Set the document file stem
    pub fn config_name(mut self, name: &str) -> Self {
        self.config_name = name.to_string();
        self
    }

    /// Set the document file extension
    pub fn file_extension(mut self, extension: &str) -> Self {
        self.file_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Enable or disable pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the bulk save ordering policy
    pub fn upsert_ordering(mut self, ordering: UpsertOrdering) -> Self {
        self.upsert_ordering = ordering;
        self
    }

    /// Full path of the backing document
    pub fn document_path(&self) -> PathBuf {
        let file_name = if self.file_extension.is_empty() {
            self.config_name.clone()
        } else {
            format!("{}.{}", self.config_name, self.file_extension)
        };
        self.directory.join(file_name)
    }
}

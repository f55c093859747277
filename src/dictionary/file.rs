use super::{DurableDictionary, ensure_writable_key};
use crate::config::StoreConfig;
use crate::core::{Result, StoreError};
use crate::migration::MigrationLedger;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{Level, event};

/// Dictionary stored as one JSON object in one file.
///
/// Every read parses the file again, so changes made by other writers are
/// visible on the next call. Every write replaces the file atomically: the new
/// document goes to a temp file in the same directory, is synced, then renamed
/// over the old one.
#[derive(Debug, Clone)]
pub struct JsonFileDictionary {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileDictionary {
    /// Opens the document described by `config` and brings it up to date with
    /// `ledger`.
    pub fn open(config: &StoreConfig, ledger: &MigrationLedger) -> Result<Self> {
        Self::open_path(config.document_path(), config.pretty, ledger)
    }

    /// Opens the document at `path`, migrating it if it is stale.
    ///
    /// A missing file is an empty document; it is created on the first write.
    pub fn open_path(
        path: impl Into<PathBuf>,
        pretty: bool,
        ledger: &MigrationLedger,
    ) -> Result<Self> {
        let dictionary = Self {
            path: path.into(),
            pretty,
        };

        let document = Value::Object(dictionary.read_document()?);
        let outcome = ledger.migrate_document(document)?;
        if outcome.changed() {
            let Value::Object(migrated) = outcome.document else {
                return Err(StoreError::Migration(
                    "Migrated document root must be a JSON object".to_string(),
                ));
            };
            dictionary.write_document(&migrated)?;
            event!(
                Level::INFO,
                path = %dictionary.path.display(),
                from_version = outcome.from_version,
                to_version = outcome.to_version,
                "store document migrated on open"
            );
        }

        Ok(dictionary)
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full document, including internal bookkeeping.
    pub fn read_document(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        let document = serde_json::from_slice::<Value>(&bytes)
            .map_err(|err| StoreError::malformed(&self.path, err.to_string()))?;

        match document {
            Value::Object(object) => Ok(object),
            other => Err(StoreError::malformed(
                &self.path,
                format!("expected a JSON object at the root, found {}", json_kind(&other)),
            )),
        }
    }

    /// Replaces the document on disk.
    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| StoreError::io(&parent, err))?;

        let bytes = self.serialize(document)?;
        let mut tmp = NamedTempFile::new_in(&parent).map_err(|err| StoreError::io(&parent, err))?;
        tmp.write_all(&bytes)
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;

        event!(Level::TRACE, path = %self.path.display(), bytes = bytes.len(), "store document written");
        Ok(())
    }

    fn serialize(&self, document: &Map<String, Value>) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        if self.pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
            let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
            document.serialize(&mut serializer)?;
        } else {
            serde_json::to_writer(&mut bytes, document)?;
        }
        Ok(bytes)
    }
}

impl DurableDictionary for JsonFileDictionary {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut document = self.read_document()?;
        Ok(document.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        ensure_writable_key(key)?;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);
        self.write_document(&document)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        ensure_writable_key(key)?;
        let mut document = self.read_document()?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

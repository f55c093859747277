impl MigrationLedger {
    /// Brings `document` up to date.
    ///
    /// The document must be a JSON object. Pending transforms run in ascending
    /// version order, each receiving the previous output with the internal
    /// bookkeeping key removed. A failing transform aborts the whole chain, so
    /// callers never observe a half-migrated document.
    ///
    /// Documents stamped above `current_version` were written by newer
    /// software and are returned unchanged.
    pub fn migrate_document(&self, document: Value) -> Result<MigrationOutcome> {
        self.validate()?;

        let from_version = stamped_version(&document)?;
        let span = info_span!(
            "clusterstore.migrate",
            from_version,
            current_version = self.current_version
        );
        let _enter = span.enter();

        if from_version > self.current_version {
            event!(
                Level::WARN,
                from_version,
                current_version = self.current_version,
                "document was written by a newer schema version, skipping migrations"
            );
            return Ok(unchanged(document, from_version));
        }

        let pending = self.pending_from(from_version);
        if pending.is_empty() {
            return Ok(unchanged(document, from_version));
        }

        let Value::Object(mut root) = document else {
            return Err(StoreError::Migration(
                "Document root must be a JSON object".to_string(),
            ));
        };
        let internal = root.remove(INTERNAL_KEY);
        let mut current = Value::Object(root);
        let mut applied = Vec::with_capacity(pending.len());

        for step in pending {
            current = step.apply(current).map_err(|err| {
                event!(Level::ERROR, version = step.version, error = %err, "migration failed");
                StoreError::Migration(format!("Migration {} failed: {}", step.version, err))
            })?;
            if !current.is_object() {
                return Err(StoreError::Migration(format!(
                    "Migration {} produced a non-object document",
                    step.version
                )));
            }
            // Transforms must not smuggle bookkeeping back in.
            if let Some(object) = current.as_object_mut() {
                object.remove(INTERNAL_KEY);
            }
            applied.push(step.version);
            event!(Level::DEBUG, version = step.version, "migration applied");
        }

        let to_version = applied.last().copied().unwrap_or(from_version);
        let Value::Object(mut migrated) = current else {
            return Err(StoreError::Migration(
                "Migrated document root must be a JSON object".to_string(),
            ));
        };
        migrated.insert(INTERNAL_KEY.to_string(), stamp(internal, to_version));

        event!(Level::INFO, from_version, to_version, "document migrated");
        Ok(MigrationOutcome {
            document: Value::Object(migrated),
            from_version,
            to_version,
            applied,
        })
    }
}

fn unchanged(document: Value, version: u32) -> MigrationOutcome {
    MigrationOutcome {
        document,
        from_version: version,
        to_version: version,
        applied: Vec::new(),
    }
}

/// Reads the migration stamp of `document`, treating an absent stamp as
/// [`UNVERSIONED`].
pub fn stamped_version(document: &Value) -> Result<u32> {
    let Some(internal) = document.get(INTERNAL_KEY) else {
        return Ok(UNVERSIONED);
    };
    let Some(version) = internal.get("migrations").and_then(|m| m.get("version")) else {
        return Ok(UNVERSIONED);
    };
    version
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            StoreError::Migration(format!("Invalid migration version marker: {}", version))
        })
}

/// Writes `version` into the internal section, keeping any sibling entries.
fn stamp(internal: Option<Value>, version: u32) -> Value {
    let mut internal = match internal {
        Some(Value::Object(object)) => object,
        _ => Map::new(),
    };
    let mut migrations = match internal.remove("migrations") {
        Some(Value::Object(object)) => object,
        _ => Map::new(),
    };
    migrations.insert("version".to_string(), Value::from(version));
    internal.insert("migrations".to_string(), Value::Object(migrations));
    Value::Object(internal)
}

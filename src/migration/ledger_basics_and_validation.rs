impl MigrationLedger {
    /// Creates an empty ledger for software at schema `current_version`.
    pub fn new(current_version: u32) -> Self {
        Self {
            current_version,
            steps: Vec::new(),
        }
    }

    /// Returns the schema version this ledger migrates up to.
    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    /// Returns the registered steps in ascending version order.
    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    /// Registers a transform for `version`, validating the ledger immediately.
    ///
    /// On failure the ledger is left as it was before the call.
    pub fn add_step<F>(&mut self, version: u32, transform: F) -> Result<()>
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.push_step(MigrationStep::new(version, transform))
    }

    /// Fluent builder method to add a step.
    pub fn with_step<F>(mut self, version: u32, transform: F) -> Result<Self>
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.add_step(version, transform)?;
        Ok(self)
    }

    /// Registers an already-built step.
    pub fn push_step(&mut self, step: MigrationStep) -> Result<()> {
        let position = self
            .steps
            .partition_point(|existing| existing.version < step.version);
        self.steps.insert(position, step);
        if let Err(err) = self.validate() {
            self.steps.remove(position);
            return Err(err);
        }
        Ok(())
    }

    /// Validates the integrity of the ledger.
    ///
    /// Checks for:
    /// - version validity (>= 1),
    /// - step bounds (`version <= current`),
    /// - duplicate versions.
    pub fn validate(&self) -> Result<()> {
        if self.current_version == UNVERSIONED {
            return Err(StoreError::Migration(
                "Schema version must be >= 1".to_string(),
            ));
        }

        let mut seen = HashSet::<u32>::new();
        for step in &self.steps {
            if step.version == UNVERSIONED {
                return Err(StoreError::Migration(
                    "Migration version must be >= 1".to_string(),
                ));
            }
            if step.version > self.current_version {
                return Err(StoreError::Migration(format!(
                    "Migration {} exceeds current schema version {}",
                    step.version, self.current_version
                )));
            }
            if !seen.insert(step.version) {
                return Err(StoreError::Migration(format!(
                    "Duplicate migration for version {}",
                    step.version
                )));
            }
        }

        Ok(())
    }

    /// Returns the steps a document stamped at `stamped_version` still needs,
    /// in the order they must run.
    pub fn pending_from(&self, stamped_version: u32) -> Vec<&MigrationStep> {
        self.steps
            .iter()
            .filter(|step| step.version > stamped_version)
            .collect()
    }
}

impl Default for MigrationLedger {
    fn default() -> Self {
        Self::new(1)
    }
}

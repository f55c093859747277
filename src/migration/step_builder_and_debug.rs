impl std::fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("version", &self.version)
            .field("has_transform", &true)
            .finish()
    }
}

impl MigrationStep {
    /// Creates a step that brings a document up to `version`.
    pub fn new<F>(version: u32, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            version,
            transform: Arc::new(transform),
        }
    }

    /// Runs the transform on `document`.
    pub fn apply(&self, document: Value) -> Result<Value> {
        (self.transform)(document)
    }
}

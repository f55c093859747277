impl<D: DurableDictionary> ClusterStore<D> {
    /// Removes the cluster with `id`. Returns `false` if it was not stored.
    pub fn remove_cluster(&mut self, id: &str) -> Result<bool> {
        let span = info_span!("clusterstore.remove", cluster_id = %id);
        let _enter = span.enter();

        self.delete_legacy_key(id);

        let mut entries = self.read_collection()?;
        let Some(index) = position_of(&entries, id) else {
            return Ok(false);
        };
        entries.remove(index);
        self.write_collection(entries)?;

        event!(Level::DEBUG, "cluster removed");
        Ok(true)
    }

    /// Removes every cluster in `workspace` with one collection write.
    ///
    /// Returns how many clusters were removed.
    pub fn remove_clusters_by_workspace(&mut self, workspace: &str) -> Result<usize> {
        let span = info_span!("clusterstore.remove_workspace", workspace = %workspace);
        let _enter = span.enter();

        let entries = self.read_collection()?;
        let (removed, kept): (Vec<Value>, Vec<Value>) = entries
            .into_iter()
            .partition(|entry| entry_workspace(entry) == Some(workspace));
        if removed.is_empty() {
            return Ok(0);
        }

        for id in removed.iter().filter_map(entry_id) {
            self.delete_legacy_key(id);
        }
        self.write_collection(kept)?;

        event!(Level::DEBUG, removed = removed.len(), "workspace clusters removed");
        Ok(removed.len())
    }

    /// Drops a per-id top-level key left behind by older layouts.
    ///
    /// Never fails: the key usually does not exist, and a failure here must
    /// not block removal from the collection.
    fn delete_legacy_key(&mut self, id: &str) {
        if id == CLUSTERS_KEY || is_reserved_key(id) {
            return;
        }
        if let Err(err) = self.dictionary.delete(id) {
            event!(Level::WARN, cluster_id = %id, error = %err, "legacy cluster key delete failed");
        }
    }
}

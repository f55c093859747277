impl<D: DurableDictionary> ClusterStore<D> {
    /// Inserts or replaces one cluster.
    ///
    /// Only the stored fields of `cluster` are written. An existing record with
    /// the same id is replaced where it sits; other records keep their
    /// positions. The collection is written back with one `set`.
    pub fn save_cluster<E: ClusterEntity + ?Sized>(&mut self, cluster: &E) -> Result<()> {
        let record = cluster.to_record();
        let span = info_span!(
            "clusterstore.save",
            cluster_id = %record.id,
            workspace = %record.workspace
        );
        let _enter = span.enter();

        let mut entries = self.read_collection()?;
        let replaced = upsert_in_place(&mut entries, &record.id, encode_record(&record)?);
        self.write_collection(entries)?;

        event!(Level::DEBUG, replaced, "cluster saved");
        Ok(())
    }

    /// Upserts a batch of clusters in input order with a single write.
    ///
    /// With [`UpsertOrdering::PreservePosition`] each record behaves like
    /// [`save_cluster`](Self::save_cluster). With [`UpsertOrdering::MoveToEnd`]
    /// each stored record is removed first and the new one appended, so the
    /// batch ends up at the tail of the collection in input order.
    pub fn store_clusters<E: ClusterEntity>(&mut self, clusters: &[E]) -> Result<()> {
        if clusters.is_empty() {
            return Ok(());
        }

        let span = info_span!(
            "clusterstore.store_all",
            count = clusters.len(),
            ordering = ?self.upsert_ordering
        );
        let _enter = span.enter();

        let mut entries = self.read_collection()?;
        for cluster in clusters {
            let record = cluster.to_record();
            let encoded = encode_record(&record)?;
            self.delete_legacy_key(&record.id);
            match self.upsert_ordering {
                UpsertOrdering::PreservePosition => {
                    upsert_in_place(&mut entries, &record.id, encoded);
                }
                UpsertOrdering::MoveToEnd => {
                    entries.retain(|entry| entry_id(entry) != Some(record.id.as_str()));
                    entries.push(encoded);
                }
            }
        }
        self.write_collection(entries)?;

        event!(Level::DEBUG, "clusters stored");
        Ok(())
    }
}

/// Replaces the entry with `id` or appends `encoded`. Returns `true` on replace.
fn upsert_in_place(entries: &mut Vec<Value>, id: &str, encoded: Value) -> bool {
    match position_of(entries, id) {
        Some(index) => {
            entries[index] = encoded;
            true
        }
        None => {
            entries.push(encoded);
            false
        }
    }
}

impl<D: DurableDictionary> ClusterStore<D> {
    /// Returns every stored record in collection order.
    pub fn get_all_records(&self) -> Result<Vec<ClusterRecord>> {
        self.read_collection()?
            .into_iter()
            .enumerate()
            .map(|(index, entry)| decode_record(index, entry))
            .collect()
    }

    /// Returns every stored record as a runtime entity, in collection order.
    pub fn get_all_clusters<E: ClusterEntity>(&self) -> Result<Vec<E>> {
        Ok(self
            .get_all_records()?
            .into_iter()
            .map(E::from_record)
            .collect())
    }

    /// Returns the entity with `id`, or `None` if no such record is stored.
    pub fn get_cluster<E: ClusterEntity>(&self, id: &str) -> Result<Option<E>> {
        Ok(self
            .get_all_records()?
            .into_iter()
            .find(|record| record.id == id)
            .map(E::from_record))
    }

    /// Returns `true` if a record with `id` is stored.
    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(position_of(&self.read_collection()?, id).is_some())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read_collection()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_collection()?.is_empty())
    }

    /// Refreshes `cluster` from its latest stored record.
    ///
    /// Returns `false`, leaving `cluster` untouched, when nothing is stored
    /// under its id.
    pub fn reload_cluster<E: ClusterEntity>(&self, cluster: &mut E) -> Result<bool> {
        let Some(stored) = self.get_cluster::<ClusterRecord>(cluster.id())? else {
            event!(Level::DEBUG, cluster_id = %cluster.id(), "reload skipped, cluster not stored");
            return Ok(false);
        };
        cluster.apply_record(&stored);
        Ok(true)
    }
}

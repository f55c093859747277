use clusterstore::{
    CLUSTERS_KEY, Cluster, ClusterEntity, ClusterRecord, ClusterStore, DurableDictionary,
    MemoryClusterStore, MemoryDictionary, MigrationLedger, StoreError, UpsertOrdering,
};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Dictionary whose `delete` always fails, as a broken legacy key would.
struct FailingDeleteDictionary {
    inner: MemoryDictionary,
    delete_attempts: usize,
}

impl DurableDictionary for FailingDeleteDictionary {
    fn get(&self, key: &str) -> clusterstore::Result<Option<Value>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> clusterstore::Result<()> {
        self.inner.set(key, value)
    }

    fn delete(&mut self, _key: &str) -> clusterstore::Result<()> {
        self.delete_attempts += 1;
        Err(StoreError::Io {
            path: PathBuf::from("legacy-key"),
            source: std::io::Error::other("delete refused"),
        })
    }
}

fn failing_delete_store(ordering: UpsertOrdering) -> ClusterStore<FailingDeleteDictionary> {
    let dictionary = FailingDeleteDictionary {
        inner: MemoryDictionary::new(),
        delete_attempts: 0,
    };
    ClusterStore::new(dictionary, ordering)
}

fn record(id: &str, workspace: &str) -> ClusterRecord {
    ClusterRecord::new(id, format!("/kube/{id}.yaml"), format!("{id}-context"), workspace)
        .with_preferences(json!({"clusterName": id}))
}

fn ids(store: &MemoryClusterStore) -> Vec<String> {
    store
        .get_all_records()
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect()
}

fn store_with(document: serde_json::Value, ordering: UpsertOrdering) -> MemoryClusterStore {
    let dictionary = MemoryDictionary::with_document(document, &MigrationLedger::default()).unwrap();
    ClusterStore::new(dictionary, ordering)
}

#[test]
fn empty_store_lists_nothing() {
    let store = MemoryClusterStore::in_memory();
    assert!(store.get_all_records().unwrap().is_empty());
    assert!(store.get_all_clusters::<Cluster>().unwrap().is_empty());
    assert!(store.get_cluster::<Cluster>("missing").unwrap().is_none());
    assert!(store.is_empty().unwrap());
}

#[test]
fn save_list_and_remove_by_workspace_scenario() {
    let mut store = MemoryClusterStore::in_memory();

    store.save_cluster(&record("a", "w1")).unwrap();
    assert_eq!(store.get_all_records().unwrap(), vec![record("a", "w1")]);

    store.save_cluster(&record("b", "w2")).unwrap();
    assert_eq!(store.len().unwrap(), 2);

    assert_eq!(store.remove_clusters_by_workspace("w1").unwrap(), 1);
    assert_eq!(ids(&store), vec!["b"]);

    assert!(store.remove_cluster("b").unwrap());
    assert!(store.get_all_records().unwrap().is_empty());
}

#[test]
fn dotted_context_name_is_kept_literally() {
    let mut store = MemoryClusterStore::in_memory();
    let mut dotted = record("a", "w1");
    dotted.context_name = "ctx.with.dots".to_string();
    store.save_cluster(&dotted).unwrap();

    let cluster = store.get_cluster::<Cluster>("a").unwrap().unwrap();
    assert_eq!(cluster.context_name, "ctx.with.dots");
}

#[test]
fn saving_existing_id_replaces_in_place() {
    let mut store = MemoryClusterStore::in_memory();
    for id in ["a", "b", "c"] {
        store.save_cluster(&record(id, "w")).unwrap();
    }

    let mut updated = record("b", "other");
    updated.kube_config_path = "/new/path".to_string();
    store.save_cluster(&updated).unwrap();

    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    let stored = store.get_cluster::<ClusterRecord>("b").unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn saving_twice_is_idempotent() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("a", "w")).unwrap();
    let once = store.dictionary().document();

    store.save_cluster(&record("a", "w")).unwrap();
    assert_eq!(store.dictionary().document(), once);
}

#[test]
fn save_drops_runtime_only_state() {
    let mut store = MemoryClusterStore::in_memory();
    let mut cluster = Cluster::from_record(record("a", "w"));
    cluster.set_failure("unreachable");
    store.save_cluster(&cluster).unwrap();

    let stored = store.dictionary().get(CLUSTERS_KEY).unwrap().unwrap();
    assert_eq!(
        stored,
        json!([{
            "id": "a",
            "kubeConfigPath": "/kube/a.yaml",
            "contextName": "a-context",
            "preferences": {"clusterName": "a"},
            "workspace": "w"
        }])
    );
}

#[test]
fn each_save_is_one_write() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("a", "w")).unwrap();
    store.save_cluster(&record("a", "w")).unwrap();
    assert_eq!(store.dictionary().write_count(), 2);
}

#[test]
fn removal_is_idempotent() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("a", "w")).unwrap();
    store.save_cluster(&record("b", "w")).unwrap();

    assert!(store.remove_cluster("a").unwrap());
    let after_first = store.dictionary().document();
    assert!(!store.remove_cluster("a").unwrap());
    assert_eq!(store.dictionary().document(), after_first);
}

#[test]
fn remove_by_workspace_keeps_other_records_untouched() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("a", "w1")).unwrap();
    store.save_cluster(&record("b", "w2")).unwrap();
    store.save_cluster(&record("c", "w1")).unwrap();
    store.save_cluster(&record("d", "w3")).unwrap();
    let writes_before = store.dictionary().write_count();

    assert_eq!(store.remove_clusters_by_workspace("w1").unwrap(), 2);
    assert_eq!(
        store.get_all_records().unwrap(),
        vec![record("b", "w2"), record("d", "w3")]
    );
    assert_eq!(store.dictionary().write_count(), writes_before + 1);

    assert_eq!(store.remove_clusters_by_workspace("w1").unwrap(), 0);
    assert_eq!(store.remove_clusters_by_workspace("unknown").unwrap(), 0);
}

#[test]
fn remove_drops_legacy_per_id_key() {
    let mut store = store_with(
        json!({
            "a": {"legacy": true},
            "clusters": [{
                "id": "a", "kubeConfigPath": "/k", "contextName": "c", "workspace": "w"
            }]
        }),
        UpsertOrdering::PreservePosition,
    );

    assert!(store.remove_cluster("a").unwrap());
    assert!(!store.dictionary().has("a").unwrap());
    assert!(store.get_all_records().unwrap().is_empty());
}

#[test]
fn cluster_named_like_the_collection_does_not_wipe_it() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("clusters", "w")).unwrap();
    store.save_cluster(&record("other", "w")).unwrap();

    assert!(store.remove_cluster("clusters").unwrap());
    assert_eq!(ids(&store), vec!["other"]);
}

#[test]
fn reload_refreshes_mutable_fields_only() {
    let mut store = MemoryClusterStore::in_memory();
    store.save_cluster(&record("a", "w1")).unwrap();

    let mut live = store.get_cluster::<Cluster>("a").unwrap().unwrap();
    live.set_online(true);

    let mut changed = record("a", "w2");
    changed.context_name = "renamed".to_string();
    changed.preferences = json!({"icon": "x"});
    store.save_cluster(&changed).unwrap();

    assert!(store.reload_cluster(&mut live).unwrap());
    assert_eq!(live.id, "a");
    assert_eq!(live.workspace, "w2");
    assert_eq!(live.context_name, "renamed");
    assert_eq!(live.preferences, json!({"icon": "x"}));
    assert!(live.online);
}

#[test]
fn reload_of_unknown_cluster_leaves_it_unchanged() {
    let store = MemoryClusterStore::in_memory();
    let mut live = Cluster::from_record(record("ghost", "w"));
    let before = live.clone();
    assert!(!store.reload_cluster(&mut live).unwrap());
    assert_eq!(live, before);
}

#[test]
fn bulk_store_preserves_positions_by_default() {
    let mut store = MemoryClusterStore::in_memory();
    for id in ["a", "b", "c"] {
        store.save_cluster(&record(id, "w")).unwrap();
    }
    let writes_before = store.dictionary().write_count();

    store
        .store_clusters(&[record("a", "x"), record("d", "x")])
        .unwrap();

    assert_eq!(ids(&store), vec!["a", "b", "c", "d"]);
    assert_eq!(
        store.get_cluster::<ClusterRecord>("a").unwrap().unwrap().workspace,
        "x"
    );
    assert_eq!(store.dictionary().write_count(), writes_before + 1);
}

#[test]
fn bulk_store_can_move_records_to_the_end() {
    let mut store = store_with(json!({}), UpsertOrdering::MoveToEnd);
    for id in ["a", "b", "c"] {
        store.save_cluster(&record(id, "w")).unwrap();
    }

    store
        .store_clusters(&[record("a", "x"), record("b", "x")])
        .unwrap();

    assert_eq!(ids(&store), vec!["c", "a", "b"]);
}

#[test]
fn bulk_store_of_nothing_does_not_write() {
    let mut store = MemoryClusterStore::in_memory();
    store.store_clusters::<ClusterRecord>(&[]).unwrap();
    assert_eq!(store.dictionary().write_count(), 0);
}

#[test]
fn untouched_entries_keep_unknown_fields() {
    let mut store = store_with(
        json!({
            "clusters": [{
                "id": "old", "kubeConfigPath": "/k", "contextName": "c",
                "workspace": "w", "futureField": [1, 2, 3]
            }],
            "lastActiveClusterId": "old"
        }),
        UpsertOrdering::PreservePosition,
    );

    store.save_cluster(&record("new", "w")).unwrap();

    let document = store.dictionary().document();
    assert_eq!(document["clusters"][0]["futureField"], json!([1, 2, 3]));
    assert_eq!(document["lastActiveClusterId"], json!("old"));
}

#[test]
fn absent_preferences_stay_absent() {
    let mut store = store_with(
        json!({
            "clusters": [{
                "id": "a", "kubeConfigPath": "/k", "contextName": "c", "workspace": "w"
            }]
        }),
        UpsertOrdering::PreservePosition,
    );

    let cluster = store.get_cluster::<Cluster>("a").unwrap().unwrap();
    store.save_cluster(&cluster).unwrap();

    let entry = &store.dictionary().document()["clusters"][0];
    assert!(entry.get("preferences").is_none());
}

#[test]
fn null_preferences_are_saved_absent() {
    let mut store = store_with(
        json!({
            "clusters": [{
                "id": "a", "kubeConfigPath": "/k", "contextName": "c", "workspace": "w",
                "preferences": null
            }]
        }),
        UpsertOrdering::PreservePosition,
    );

    let record = store.get_all_records().unwrap().remove(0);
    assert_eq!(record.preferences, Value::Null);
    store.save_cluster(&record).unwrap();

    let entry = &store.dictionary().document()["clusters"][0];
    assert!(entry.get("preferences").is_none());
}

#[test]
fn malformed_collection_is_reported() {
    let store = store_with(json!({"clusters": {"id": "a"}}), UpsertOrdering::default());
    assert!(store.get_all_records().is_err());

    let store = store_with(json!({"clusters": [{"id": 1}]}), UpsertOrdering::default());
    assert!(store.get_all_records().is_err());
}

#[test]
fn new_ids_are_unique() {
    let first = ClusterRecord::new_id();
    let second = ClusterRecord::new_id();
    assert_ne!(first, second);
    assert_eq!(first.len(), 36);
}

#[test]
fn failing_legacy_delete_does_not_block_removal() {
    let mut store = failing_delete_store(UpsertOrdering::PreservePosition);
    for (id, workspace) in [("a", "w1"), ("b", "w2"), ("c", "w2"), ("d", "w3")] {
        store.save_cluster(&record(id, workspace)).unwrap();
    }

    assert!(store.remove_cluster("a").unwrap());
    assert_eq!(store.remove_clusters_by_workspace("w2").unwrap(), 2);

    assert_eq!(store.get_all_records().unwrap(), vec![record("d", "w3")]);
    assert_eq!(store.dictionary().delete_attempts, 3);
}

#[test]
fn failing_legacy_delete_does_not_block_move_to_end() {
    let mut store = failing_delete_store(UpsertOrdering::MoveToEnd);
    for id in ["a", "b"] {
        store.save_cluster(&record(id, "w")).unwrap();
    }

    store.store_clusters(&[record("a", "x")]).unwrap();

    let stored = store.get_all_records().unwrap();
    assert_eq!(stored, vec![record("b", "w"), record("a", "x")]);
    assert_eq!(store.dictionary().delete_attempts, 1);
}

#[test]
fn bulk_store_drops_legacy_keys_for_every_ordering() {
    for ordering in [UpsertOrdering::PreservePosition, UpsertOrdering::MoveToEnd] {
        let mut store = store_with(
            json!({
                "a": {"legacy": true},
                "clusters": [{
                    "id": "a", "kubeConfigPath": "/k", "contextName": "c", "workspace": "w"
                }]
            }),
            ordering,
        );
        assert_eq!(store.upsert_ordering(), ordering);

        store.store_clusters(&[record("a", "x")]).unwrap();

        let dictionary = store.into_dictionary();
        assert!(!dictionary.has("a").unwrap());
        assert_eq!(dictionary.document()["clusters"][0]["workspace"], json!("x"));
    }
}

//! Persistence Integration Tests
//!
//! Collections written through a file-backed `Database` survive a reopen;
//! corrupt or missing blobs load as empty without failing startup.

use std::sync::Arc;

use promptsmith_desktop::services::CollectionStore;
use promptsmith_desktop::storage::{keys, Database, DurableStore};

use crate::support::item;

fn file_store(path: &std::path::Path) -> (Database, DurableStore) {
    let db = Database::open(path).expect("open database");
    let store = DurableStore::new(Arc::new(db.clone()));
    (db, store)
}

#[test]
fn test_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");

    {
        let (_db, store) = file_store(&path);
        let mut collections = CollectionStore::load(store, 20);
        collections.append(item(1));
        collections.append(item(2));
        collections.toggle_saved(&item(1));
        collections.update("item-001", "tightened");
    }

    let (_db, store) = file_store(&path);
    let collections = CollectionStore::load(store, 20);
    let ids: Vec<_> = collections.history().iter().map(|i| i.id()).collect();
    assert_eq!(ids, vec!["item-002", "item-001"]);
    assert_eq!(collections.history()[1].refined_prompt(), "tightened");
    assert_eq!(collections.saved().len(), 1);
    assert_eq!(collections.saved()[0].refined_prompt(), "tightened");
}

#[test]
fn test_corrupt_history_loads_empty_and_keeps_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    let (db, store) = file_store(&path);

    store.save(keys::SAVED, &vec![item(4)]).unwrap();
    db.set_value(keys::HISTORY, "{not a list").unwrap();

    let mut collections = CollectionStore::load(store.clone(), 20);
    assert!(collections.history().is_empty());
    assert_eq!(collections.saved().len(), 1);

    // The next write replaces the corrupt blob
    collections.append(item(5));
    let reloaded = CollectionStore::load(store, 20);
    assert_eq!(reloaded.history().len(), 1);
}

#[test]
fn test_oversized_persisted_history_is_truncated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let (_db, store) = file_store(&dir.path().join("data.db"));
    let items: Vec<_> = (0..30).rev().map(item).collect();
    store.save(keys::HISTORY, &items).unwrap();

    let collections = CollectionStore::load(store, 20);
    assert_eq!(collections.history().len(), 20);
    assert_eq!(collections.history()[0].id(), "item-029");
    assert_eq!(collections.history()[19].id(), "item-010");
}

#[test]
fn test_clear_saved_removes_key_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");

    {
        let (_db, store) = file_store(&path);
        let mut collections = CollectionStore::load(store, 20);
        collections.append(item(1));
        collections.toggle_saved(&item(1));
        collections.clear_saved();
    }

    let (db, store) = file_store(&path);
    assert!(db.get_value(keys::SAVED).unwrap().is_none());
    assert!(!store.contains(keys::SAVED));
    assert!(store.contains(keys::HISTORY));
}

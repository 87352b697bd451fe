//! Integration test: quote store on the file-backed long-lived store

use quote_store::{FileStore, MemoryStore, Pick, Quote, QuoteStore, StoreError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_quotes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut store = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
        store.add("Carpe diem", "Life").unwrap();
        store.set_filter("Life").unwrap();
    }

    let store = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    assert_eq!(store.len(), 3);
    assert_eq!(store.filter(), "Life");
    assert_eq!(store.last_displayed(), None);
}

#[test]
fn test_corrupt_store_file_loads_seed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "definitely not json").unwrap();

    let mut store = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    assert_eq!(store.len(), 2);

    store.add("Carpe diem", "Life").unwrap();
    let reloaded = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn test_reconcile_keeps_concurrent_local_add() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut syncer = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    let mut editor = QuoteStore::load(FileStore::new(&path), MemoryStore::new());

    editor.add("Added by the user", "Life").unwrap();
    let added = syncer
        .reconcile(&[Quote::new("Do or do not...", "Motivation")])
        .unwrap();

    assert_eq!(added.len(), 1);
    assert_eq!(syncer.len(), 4);

    let reloaded = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    assert!(reloaded.quotes().contains(&Quote::new("Added by the user", "Life")));
    assert!(reloaded.quotes().contains(&Quote::new("Do or do not...", "Motivation")));
}

#[test]
fn test_export_and_import_files() {
    let dir = TempDir::new().unwrap();
    let export_path = dir.path().join("quotes.json");

    let source_store = FileStore::new(dir.path().join("a.json"));
    let mut source = QuoteStore::load(source_store, MemoryStore::new());
    source.add("Carpe diem", "Life").unwrap();
    assert_eq!(source.export_to_file(&export_path).unwrap(), 3);

    let target_store = FileStore::new(dir.path().join("b.json"));
    {
        use quote_store::KeyValueStore;
        target_store.set("quotes", "[]").unwrap();
    }
    let mut target = QuoteStore::load(target_store, MemoryStore::new());
    assert_eq!(target.import_from_file(&export_path).unwrap(), 3);
    assert_eq!(target.quotes(), source.quotes());

    let bad_path = dir.path().join("bad.json");
    fs::write(&bad_path, "{\"text\": \"x\"}").unwrap();
    assert!(matches!(target.import_from_file(&bad_path), Err(StoreError::NotAnArray)));

    let missing = dir.path().join("missing.json");
    assert!(matches!(target.import_from_file(&missing), Err(StoreError::Io(_))));
}

#[test]
fn test_session_slot_is_per_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let session = MemoryStore::new();

    let mut store = QuoteStore::load(FileStore::new(&path), session.clone());
    let Pick::Quote(shown) = store.pick_random("all") else {
        panic!("seed collection should not be empty");
    };

    let same_session = QuoteStore::load(FileStore::new(&path), session);
    assert_eq!(same_session.last_displayed(), Some(shown.text.as_str()));

    let new_session = QuoteStore::load(FileStore::new(&path), MemoryStore::new());
    assert_eq!(new_session.last_displayed(), None);
}

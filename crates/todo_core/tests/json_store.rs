use std::collections::HashSet;
use std::fs;
use todo_core::{Item, JsonFileStore, StoreCause, StoreConfig, StoreError};

#[test]
fn open_missing_file_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("todo.json");

    let store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    assert!(store.is_empty());
    assert!(path.exists());
    assert_eq!(store.backup_path(), dir.path().join("data").join("todo.json.bak"));
}

#[test]
fn open_zero_length_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    fs::write(&path, "").unwrap();

    let store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    assert_eq!(store.len(), 0);
}

#[test]
fn open_corrupt_file_is_init_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    fs::write(&path, "[{\"id\": 1, \"title\": ").unwrap();

    let err = JsonFileStore::open(StoreConfig::new(&path)).unwrap_err();
    match err {
        StoreError::Init { path: failed, cause } => {
            assert_eq!(failed, path);
            assert!(matches!(cause, StoreCause::Json(_)));
        }
        other => panic!("expected init error, got {other:?}"),
    }
}

#[test]
fn open_with_wrong_field_casing_is_init_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    fs::write(&path, r#"[{"id": 1, "title": "a", "is_done": false}]"#).unwrap();

    let err = JsonFileStore::open(StoreConfig::new(&path)).unwrap_err();
    assert!(matches!(err, StoreError::Init { .. }));
}

#[test]
fn persist_then_reopen_yields_same_item_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let mut store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    store.insert(Item::new(8, "eight"));
    store.insert(Item {
        id: -1,
        title: "negative ids are allowed".to_string(),
        is_done: true,
    });
    store.insert(Item::new(2, "two \"quoted\" ünïcödé"));
    store.persist().unwrap();

    let before: HashSet<String> = store.iter().map(|item| format!("{item:?}")).collect();
    let reopened = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    let after: HashSet<String> = reopened.iter().map(|item| format!("{item:?}")).collect();
    assert_eq!(before, after);
}

#[test]
fn persisted_document_uses_wire_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let mut store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    store.insert(Item::new(1, "one"));
    store.persist().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": 1, "title": "one", "isDone": false }])
    );
}

#[test]
fn unpersisted_changes_are_not_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let mut store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    store.insert(Item::new(1, "memory only"));

    let reopened = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    assert!(reopened.is_empty());
}

#[test]
fn persist_into_removed_directory_is_persist_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("todo.json");
    let mut store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    fs::remove_dir_all(&data_dir).unwrap();

    store.insert(Item::new(1, "kept in memory"));
    let err = store.persist().unwrap_err();
    assert!(matches!(err, StoreError::Persist { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn restore_replaces_file_and_memory_with_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let backup = dir.path().join("seed.json");
    fs::write(&backup, r#"[{"id": 5, "title": "seed", "isDone": true}]"#).unwrap();

    let mut store = JsonFileStore::open(StoreConfig::new(&path).with_backup(&backup)).unwrap();
    store.insert(Item::new(1, "scratch"));
    store.persist().unwrap();

    store.restore_from_backup().unwrap();
    let ids: Vec<i64> = store.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![5]);
    assert_eq!(fs::read_to_string(&path).unwrap(), fs::read_to_string(&backup).unwrap());
}

#[test]
fn restore_from_corrupt_backup_leaves_active_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let backup = dir.path().join("todo.json.bak");
    fs::write(&backup, "not json").unwrap();

    let mut store = JsonFileStore::open(StoreConfig::new(&path)).unwrap();
    store.insert(Item::new(1, "keep"));
    store.persist().unwrap();
    let on_disk = fs::read_to_string(&path).unwrap();

    let err = store.restore_from_backup().unwrap_err();
    match err {
        StoreError::Restore { backup_path, cause } => {
            assert_eq!(backup_path, backup);
            assert!(matches!(cause, StoreCause::Json(_)));
        }
        other => panic!("expected restore error, got {other:?}"),
    }
    assert_eq!(store.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), on_disk);
}

#[test]
fn restore_from_missing_backup_is_io_restore_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(StoreConfig::new(dir.path().join("todo.json"))).unwrap();

    let err = store.restore_from_backup().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Restore {
            cause: StoreCause::Io(_),
            ..
        }
    ));
    assert!(err.to_string().contains("todo.json.bak"));
}

use std::fs;
use tempfile::TempDir;
use todo_core::{
    parse_item, Item, ItemId, JsonFileStore, ServiceError, StoreConfig, StoreError, TodoService,
};

const SEED_BACKUP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/todo.json.bak");

fn seeded_service() -> (TempDir, TodoService<JsonFileStore>) {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("todo.json.bak");
    fs::copy(SEED_BACKUP, &backup).unwrap();

    let mut service = TodoService::open(StoreConfig::new(dir.path().join("todo.json"))).unwrap();
    service.restore_from_backup().unwrap();
    (dir, service)
}

fn ids(items: &[Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn add_hard_coded_item_then_get_returns_it() {
    let (_dir, mut service) = seeded_service();
    let item = Item {
        id: 999,
        title: "This is a test case item".to_string(),
        is_done: false,
    };

    service.add_item(item.clone()).unwrap();
    assert_eq!(service.get_item(999).unwrap(), item);
}

#[test]
fn add_duplicate_is_rejected_and_existing_record_is_kept() {
    let (_dir, mut service) = seeded_service();
    let before = service.get_item(3).unwrap();

    let err = service.add_item(Item::new(3, "impostor")).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateId(3)));
    assert_eq!(service.get_item(3).unwrap(), before);
}

#[test]
fn get_seeded_item() {
    let (_dir, service) = seeded_service();
    let item = service.get_item(3).unwrap();
    assert_eq!(
        item,
        Item {
            id: 3,
            title: "Learn Cloud Native Architecture".to_string(),
            is_done: false,
        }
    );
}

#[test]
fn get_all_items_returns_seed_sorted_by_id() {
    let (_dir, service) = seeded_service();
    let items = service.get_all_items();
    assert_eq!(ids(&items), vec![1, 2, 3, 4]);
}

#[test]
fn update_replaces_all_fields() {
    let (_dir, mut service) = seeded_service();
    let updated = Item {
        id: 2,
        title: "Kubernetes".to_string(),
        is_done: true,
    };

    service.update_item(updated.clone()).unwrap();
    assert_eq!(service.get_item(2).unwrap(), updated);
}

#[test]
fn delete_then_get_reports_id_not_found() {
    let (_dir, mut service) = seeded_service();
    service
        .add_item(Item::new(778, "This is a test case item."))
        .unwrap();

    service.delete_item(778).unwrap();

    let err = service.get_item(778).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(778)));
    assert_eq!(err.to_string(), "Id not found.");
}

#[test]
fn operations_on_missing_id_say_not_found() {
    let (_dir, mut service) = seeded_service();

    let errors = [
        service.get_item(404).unwrap_err(),
        service.delete_item(404).unwrap_err(),
        service.update_item(Item::new(404, "ghost")).unwrap_err(),
        service.change_done_status(404, true).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, ServiceError::NotFound(404)));
        assert!(err.to_string().contains("not found"), "unexpected error: {err}");
    }
}

#[test]
fn change_done_status_only_touches_flag_and_is_durable() {
    let (dir, mut service) = seeded_service();
    service.change_done_status(1, true).unwrap();

    let reopened = TodoService::open(StoreConfig::new(dir.path().join("todo.json"))).unwrap();
    let item = reopened.get_item(1).unwrap();
    assert!(item.is_done);
    assert_eq!(item.title, "Learn Go / GoLang");

    service.change_done_status(1, false).unwrap();
    assert!(!service.get_item(1).unwrap().is_done);
}

#[test]
fn restore_discards_every_mutation() {
    let (_dir, mut service) = seeded_service();
    let seed = service.get_all_items();

    service.add_item(Item::new(50, "extra")).unwrap();
    service.delete_item(1).unwrap();
    service.update_item(Item::new(2, "changed")).unwrap();
    service.restore_from_backup().unwrap();

    assert_eq!(service.get_all_items(), seed);
}

#[test]
fn restore_with_missing_backup_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let config = StoreConfig::new(&path).with_backup(dir.path().join("absent.json"));
    let mut service = TodoService::open(config).unwrap();
    service.add_item(Item::new(1, "only")).unwrap();
    let on_disk = fs::read_to_string(&path).unwrap();

    let err = service.restore_from_backup().unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::Restore { .. })));
    assert_eq!(ids(&service.get_all_items()), vec![1]);
    assert_eq!(fs::read_to_string(&path).unwrap(), on_disk);
}

#[test]
fn parsed_wire_item_can_be_added() {
    let (_dir, mut service) = seeded_service();
    let item =
        parse_item(r#"{"id": 12, "title": "From the command line", "isDone": true}"#).unwrap();

    service.add_item(item).unwrap();
    assert!(service.get_item(12).unwrap().is_done);
}

#[test]
fn add_random_items_round_trip() {
    let (_dir, mut service) = seeded_service();
    for id in 100..110 {
        let item = Item {
            id,
            title: format!("generated item {id}"),
            is_done: id % 2 == 0,
        };
        service.add_item(item.clone()).unwrap();
        assert_eq!(service.get_item(id).unwrap(), item);
    }
}

#[test]
fn service_can_borrow_a_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(StoreConfig::new(dir.path().join("t.json"))).unwrap();
    {
        let mut service = TodoService::new(&mut store);
        service.add_item(Item::new(7, "borrowed")).unwrap();
    }
    assert_eq!(store.len(), 1);
    assert!(store.path().exists());
}

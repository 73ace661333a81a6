//! Typed values over both storage media.

use naman_storage::{FileStorage, JsonStore, MemoryStorage, Storage, StorageError};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Line {
    product_id: String,
    quantity: f64,
}

fn lines() -> Vec<Line> {
    vec![
        Line {
            product_id: "linen".into(),
            quantity: 2.5,
        },
        Line {
            product_id: "buttons".into(),
            quantity: 12.0,
        },
    ]
}

fn exercise<S: Storage>(store: JsonStore<S>) {
    let key = "naman-cart";

    assert_eq!(store.get::<Vec<Line>>(key).unwrap(), None);
    store.set(key, &lines()).unwrap();
    assert_eq!(store.get::<Vec<Line>>(key).unwrap(), Some(lines()));
    assert_eq!(store.storage().keys().unwrap(), vec![key.to_string()]);

    store.storage().remove_item(key).unwrap();
    assert_eq!(store.get::<Vec<Line>>(key).unwrap(), None);
}

#[test]
fn memory_storage_typed_round_trip() {
    exercise(JsonStore::new(MemoryStorage::new()));
}

#[test]
fn file_storage_typed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    exercise(JsonStore::new(FileStorage::open(dir.path()).unwrap()));
}

#[test]
fn quota_failure_surfaces_through_typed_store() {
    let store = JsonStore::new(MemoryStorage::with_quota(8));
    let err = store.set("naman-cart", &lines()).unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    assert!(store.storage().is_empty());
}

#[test]
fn storage_behind_reference_and_box() {
    let storage = MemoryStorage::new();
    JsonStore::new(&storage).set("k", &1u8).unwrap();

    let boxed: Box<dyn Storage> = Box::new(storage.clone());
    assert_eq!(boxed.get_item("k").unwrap().as_deref(), Some("1"));
}

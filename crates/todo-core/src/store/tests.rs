//! Store Tests
//!
//! Store behaviour against in-memory storage, including injected failures
//! and interleaved writes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::domain::StorageError;
use crate::storage::MemoryStorage;

type Renders = Rc<RefCell<Vec<Vec<TodoItem>>>>;

fn setup() -> (TodoStore<Rc<MemoryStorage>>, Rc<MemoryStorage>, Renders) {
    let storage = Rc::new(MemoryStorage::new());
    let renders: Renders = Rc::new(RefCell::new(Vec::new()));
    let sink = renders.clone();
    let store = TodoStore::new(storage.clone(), StoreConfig::default())
        .with_render_trigger(move |items| sink.borrow_mut().push(items.to_vec()));
    (store, storage, renders)
}

fn stored(storage: &MemoryStorage) -> Vec<TodoItem> {
    let value = storage.raw("todos").expect("nothing persisted");
    serde_json::from_value(value).expect("persisted value is not a todo list")
}

fn texts(items: &[TodoItem]) -> Vec<&str> {
    items.iter().map(|item| item.text.as_str()).collect()
}

#[tokio::test]
async fn test_load_empty_storage() {
    let (store, storage, renders) = setup();
    store.load().await.unwrap();

    assert!(store.is_empty());
    assert_eq!(storage.write_count(), 0);
    assert_eq!(renders.borrow().len(), 1);
    assert!(renders.borrow()[0].is_empty());
}

#[tokio::test]
async fn test_add_persists_and_renders() {
    let (store, storage, renders) = setup();
    let id = store.add("buy milk").await.unwrap().unwrap();

    let expected = vec![TodoItem::new(id, "buy milk")];
    assert_eq!(store.snapshot(), expected);
    assert_eq!(stored(&storage), expected);
    assert_eq!(renders.borrow().last().unwrap(), &expected);
}

#[tokio::test]
async fn test_adds_give_unique_ids() {
    let (store, _, _) = setup();
    let inputs = ["a", "", "b", "   ", "c", "d"];
    for text in inputs {
        store.add(text).await.unwrap();
    }

    let items = store.snapshot();
    assert_eq!(items.len(), 4);
    let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn test_blank_add_is_noop() {
    let (store, storage, renders) = setup();
    store.add("keep").await.unwrap();
    let writes = storage.write_count();
    let render_count = renders.borrow().len();

    assert_eq!(store.add("").await.unwrap(), None);
    assert_eq!(store.add("   ").await.unwrap(), None);

    assert_eq!(store.len(), 1);
    assert_eq!(storage.write_count(), writes);
    assert_eq!(renders.borrow().len(), render_count);
}

#[tokio::test]
async fn test_milk_and_dog_scenario() {
    let (store, storage, _) = setup();
    let milk = store.add("buy milk").await.unwrap().unwrap();
    let dog = store.add("walk dog").await.unwrap().unwrap();
    assert_eq!(store.toggle(milk).await.unwrap(), Outcome::Applied);

    let mut expected_milk = TodoItem::new(milk, "buy milk");
    expected_milk.completed = true;
    let expected = vec![expected_milk, TodoItem::new(dog, "walk dog")];
    assert_eq!(store.snapshot(), expected);
    assert_eq!(stored(&storage), expected);
}

#[tokio::test]
async fn test_toggle_twice_restores() {
    let (store, _, _) = setup();
    let id = store.add("x").await.unwrap().unwrap();
    store.toggle(id).await.unwrap();
    store.toggle(id).await.unwrap();
    assert!(!store.get(id).unwrap().completed);
}

#[tokio::test]
async fn test_toggle_unknown_is_noop() {
    let (store, storage, _) = setup();
    store.add("x").await.unwrap();
    let writes = storage.write_count();
    assert_eq!(store.toggle(TodoId(424242)).await.unwrap(), Outcome::Unchanged);
    assert_eq!(storage.write_count(), writes);
}

#[tokio::test]
async fn test_rename_trims() {
    let (store, storage, _) = setup();
    store.add("A").await.unwrap();
    let b = store.add("B").await.unwrap().unwrap();
    store.rename(b, "  walk the dog  ").await.unwrap();

    assert_eq!(store.get(b).unwrap().text, "walk the dog");
    assert_eq!(texts(&stored(&storage)), vec!["A", "walk the dog"]);
}

#[tokio::test]
async fn test_rename_noops() {
    let (store, storage, _) = setup();
    let id = store.add("keep me").await.unwrap().unwrap();
    let writes = storage.write_count();

    assert_eq!(store.rename(id, "").await.unwrap(), Outcome::Unchanged);
    assert_eq!(store.rename(TodoId(999), "x").await.unwrap(), Outcome::Unchanged);
    assert_eq!(store.get(id).unwrap().text, "keep me");
    assert_eq!(storage.write_count(), writes);
}

#[tokio::test]
async fn test_remove_twice() {
    let (store, storage, _) = setup();
    let a = store.add("A").await.unwrap().unwrap();
    store.add("B").await.unwrap();

    assert_eq!(store.remove(a).await.unwrap(), Outcome::Applied);
    let after_first = store.snapshot();
    let writes = storage.write_count();

    assert_eq!(store.remove(a).await.unwrap(), Outcome::Unchanged);
    assert_eq!(store.snapshot(), after_first);
    assert_eq!(storage.write_count(), writes);
    assert_eq!(texts(&stored(&storage)), vec!["B"]);
}

#[tokio::test]
async fn test_reorder_and_back() {
    let (store, storage, _) = setup();
    for text in ["A", "B", "C"] {
        store.add(text).await.unwrap();
    }
    let original = store.snapshot();

    store.reorder(0, 2).await.unwrap();
    assert_eq!(texts(&store.snapshot()), vec!["B", "C", "A"]);
    assert_eq!(texts(&stored(&storage)), vec!["B", "C", "A"]);

    store.reorder(2, 0).await.unwrap();
    assert_eq!(store.snapshot(), original);
}

#[tokio::test]
async fn test_reorder_out_of_bounds_is_noop() {
    let (store, storage, _) = setup();
    store.add("A").await.unwrap();
    store.add("B").await.unwrap();
    let writes = storage.write_count();

    assert_eq!(store.reorder(0, 5).await.unwrap(), Outcome::Unchanged);
    assert_eq!(store.reorder(1, 1).await.unwrap(), Outcome::Unchanged);
    assert_eq!(storage.write_count(), writes);
}

#[tokio::test]
async fn test_drag_drop_commits_by_id() {
    let (store, _, _) = setup();
    let a = store.add("A").await.unwrap().unwrap();
    let b = store.add("B").await.unwrap().unwrap();
    let c = store.add("C").await.unwrap().unwrap();

    let mut dnd = crate::domain::DragController::new();
    dnd.start(a);
    dnd.hover(c);

    // List changes mid-gesture; the drop still moves A, not whatever sits at 0
    store.remove(b).await.unwrap();
    store.add("D").await.unwrap();

    let relocation = dnd.drop(c).unwrap();
    assert_eq!(store.relocate(relocation).await.unwrap(), Outcome::Applied);
    assert_eq!(texts(&store.snapshot()), vec!["C", "A", "D"]);
}

#[tokio::test]
async fn test_load_round_trip() {
    let (store, storage, _) = setup();
    let a = store.add("A").await.unwrap().unwrap();
    store.add("B").await.unwrap();
    store.toggle(a).await.unwrap();
    store.reorder(0, 1).await.unwrap();
    let written = store.snapshot();

    let reloaded = TodoStore::new(storage.clone(), StoreConfig::default());
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.snapshot(), written);
}

#[tokio::test]
async fn test_load_replaces_memory() {
    let (store, storage, renders) = setup();
    store.add("only in memory").await.unwrap();
    storage.insert_raw("todos", serde_json::json!([{"id": 5, "text": "from disk", "completed": true}]));

    store.load().await.unwrap();
    let mut expected = TodoItem::new(TodoId(5), "from disk");
    expected.completed = true;
    assert_eq!(store.snapshot(), vec![expected.clone()]);
    assert_eq!(renders.borrow().last().unwrap(), &vec![expected]);

    // Counter continues after the loaded ids
    assert_eq!(store.add("next").await.unwrap(), Some(TodoId(6)));
}

#[tokio::test]
async fn test_load_repairs_duplicate_ids() {
    let (store, storage, _) = setup();
    storage.insert_raw(
        "todos",
        serde_json::json!([
            {"id": 1700000000000u64, "text": "first", "completed": false},
            {"id": 1700000000000u64, "text": "second", "completed": false}
        ]),
    );

    store.load().await.unwrap();
    let items = store.snapshot();
    assert_ne!(items[0].id, items[1].id);
    assert_eq!(stored(&storage), items);
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test]
async fn test_load_failure_keeps_memory() {
    let (store, storage, _) = setup();
    store.add("kept").await.unwrap();
    storage.fail_next_reads(1);

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, TodoError::Persistence(StorageError::Read { .. })));
    assert_eq!(texts(&store.snapshot()), vec!["kept"]);
}

#[tokio::test]
async fn test_write_failure_is_surfaced() {
    let (store, storage, renders) = setup();
    store.add("saved").await.unwrap();
    let render_count = renders.borrow().len();
    storage.fail_next_writes(1);

    let err = store.add("optimistic").await.unwrap_err();
    assert!(matches!(err, TodoError::Persistence(StorageError::Write { .. })));

    // Memory keeps the optimistic result, storage does not have it
    assert_eq!(texts(&store.snapshot()), vec!["saved", "optimistic"]);
    assert_eq!(texts(&stored(&storage)), vec!["saved"]);
    assert_eq!(store.sync_status(), SyncStatus::Unsynced);
    assert_eq!(renders.borrow().len(), render_count);

    store.sync().await.unwrap();
    assert_eq!(store.sync_status(), SyncStatus::Synced);
    assert_eq!(texts(&stored(&storage)), vec!["saved", "optimistic"]);
    assert_eq!(renders.borrow().len(), render_count + 1);
}

#[tokio::test]
async fn test_next_write_recovers_unsynced() {
    let (store, storage, _) = setup();
    storage.fail_next_writes(1);
    assert!(store.add("lost write").await.is_err());

    store.add("second").await.unwrap();
    assert_eq!(store.sync_status(), SyncStatus::Synced);
    assert_eq!(texts(&stored(&storage)), vec!["lost write", "second"]);
}

#[tokio::test]
async fn test_custom_storage_key() {
    let storage = Rc::new(MemoryStorage::new());
    let store = TodoStore::new(storage.clone(), StoreConfig::with_storage_key("work"));
    store.add("x").await.unwrap();
    assert!(storage.raw("work").is_some());
    assert!(storage.raw("todos").is_none());
}

/// Storage whose writes yield to the executor before completing, and which
/// records every snapshot it was asked to write.
struct SlowStorage {
    inner: MemoryStorage,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
    written: RefCell<Vec<Vec<TodoItem>>>,
}

impl SlowStorage {
    fn new(inner: MemoryStorage) -> Self {
        Self {
            inner,
            in_flight: Cell::new(0),
            max_in_flight: Cell::new(0),
            written: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl StorageAdapter for SlowStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<TodoItem>>, StorageError> {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, items: &[TodoItem]) -> Result<(), StorageError> {
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight.set(self.max_in_flight.get().max(self.in_flight.get()));
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.written.borrow_mut().push(items.to_vec());
        let result = self.inner.set(key, items).await;
        self.in_flight.set(self.in_flight.get() - 1);
        result
    }
}

#[tokio::test]
async fn test_interleaved_writes_are_serialized() {
    let storage = Rc::new(SlowStorage::new(MemoryStorage::new()));
    let store = TodoStore::new(storage.clone(), StoreConfig::default());

    let a = store.add("A");
    let b = store.add("B");
    let c = store.add("C");
    let (a, b, c) = tokio::join!(a, b, c);
    let a = a.unwrap().unwrap();
    b.unwrap();
    c.unwrap();

    let d = store.toggle(a);
    let e = store.reorder(0, 2);
    let (d, e) = tokio::join!(d, e);
    d.unwrap();
    e.unwrap();

    assert_eq!(storage.max_in_flight.get(), 1);

    let final_state = store.snapshot();
    assert_eq!(texts(&final_state), vec!["B", "C", "A"]);
    assert!(final_state[2].completed);
    assert_eq!(storage.written.borrow().last().unwrap(), &final_state);
    assert_eq!(stored(&storage.inner), final_state);

    // Queued writes that found their state already written were skipped
    assert!(storage.inner.write_count() < 5);
}

#[tokio::test]
async fn test_add_during_load_lands_on_loaded_list() {
    let old = vec![TodoItem::new(TodoId(5), "old")];
    let storage = Rc::new(SlowStorage::new(MemoryStorage::with_items("todos", &old).unwrap()));
    let store = TodoStore::new(storage.clone(), StoreConfig::default());

    let (loaded, added) = tokio::join!(store.load(), store.add("typed early"));
    loaded.unwrap();
    let id = added.unwrap().unwrap();

    assert_eq!(id, TodoId(6));
    assert_eq!(texts(&store.snapshot()), vec!["old", "typed early"]);
    assert_eq!(stored(&storage.inner), store.snapshot());
    assert_eq!(store.sync_status(), SyncStatus::Synced);
}

#[tokio::test]
async fn test_toggle_during_load_sees_loaded_items() {
    let old = vec![TodoItem::new(TodoId(5), "old")];
    let storage = Rc::new(SlowStorage::new(MemoryStorage::with_items("todos", &old).unwrap()));
    let store = TodoStore::new(storage.clone(), StoreConfig::default());

    let (loaded, toggled) = tokio::join!(store.load(), store.toggle(TodoId(5)));
    loaded.unwrap();

    assert_eq!(toggled.unwrap(), Outcome::Applied);
    assert!(store.get(TodoId(5)).unwrap().completed);
    assert_eq!(stored(&storage.inner), store.snapshot());
}

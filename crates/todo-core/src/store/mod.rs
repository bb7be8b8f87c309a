//! Todo Store
//!
//! Owns the in-memory list and mirrors it to a storage adapter after every
//! mutation. Mutations apply immediately; the renderer is told about the new
//! list once the write is acknowledged.
//!
//! Writes go through a gate so only one is in flight at a time. Each write
//! snapshots the list after passing the gate, so the last write to finish is
//! always the newest state.
//!
//! A mutation issued while `load` is reading waits for the read and applies
//! to the loaded list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock};

use crate::config::StoreConfig;
use crate::domain::{Relocation, TodoError, TodoId, TodoItem, TodoList, TodoResult};
use crate::storage::StorageAdapter;

#[cfg(test)]
mod tests;

/// Result type for store operations; only persistence failures are errors
pub type StoreResult<T> = Result<T, TodoError>;

/// Callback receiving the list after each acknowledged change
pub type RenderTrigger = Rc<dyn Fn(&[TodoItem])>;

/// Whether a mutation changed the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
}

/// Whether storage holds the current in-memory list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Synced,
    /// The last write failed; memory is ahead of storage
    Unsynced,
}

pub struct TodoStore<S> {
    storage: S,
    config: StoreConfig,
    list: RefCell<TodoList>,
    render: RefCell<Option<RenderTrigger>>,
    write_gate: Mutex<()>,
    /// Held exclusively by `load` from the read until the list is replaced
    load_gate: RwLock<()>,
    /// Bumped on every change to `list`
    revision: Cell<u64>,
    /// Revision last acknowledged by storage
    persisted_revision: Cell<u64>,
    sync_status: Cell<SyncStatus>,
}

impl<S: StorageAdapter> TodoStore<S> {
    pub fn new(storage: S, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            list: RefCell::new(TodoList::new()),
            render: RefCell::new(None),
            write_gate: Mutex::new(()),
            load_gate: RwLock::new(()),
            revision: Cell::new(0),
            persisted_revision: Cell::new(0),
            sync_status: Cell::new(SyncStatus::Synced),
        }
    }

    pub fn with_render_trigger(self, render: impl Fn(&[TodoItem]) + 'static) -> Self {
        self.set_render_trigger(render);
        self
    }

    pub fn set_render_trigger(&self, render: impl Fn(&[TodoItem]) + 'static) {
        *self.render.borrow_mut() = Some(Rc::new(render));
    }

    /// Copy of the current in-memory list
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.list.borrow().items().to_vec()
    }

    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.list.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync_status.get()
    }

    /// Replace the in-memory list with what storage holds.
    ///
    /// Nothing stored means an empty list. On a read failure the current
    /// list is kept.
    pub async fn load(&self) -> StoreResult<()> {
        let key = self.config.storage_key.as_str();
        let loading = self.load_gate.write().await;
        let stored = {
            let _gate = self.write_gate.lock().await;
            self.storage.get(key).await
        };

        let items = match stored {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                warn!("load of '{}' failed: {}", key, e);
                return Err(e.into());
            }
        };

        let (list, repaired) = TodoList::from_items(items);
        info!("loaded {} items from '{}'", list.len(), key);
        *self.list.borrow_mut() = list;
        let revision = self.bump_revision();
        drop(loading);

        if repaired > 0 {
            info!("reassigned {} duplicate ids", repaired);
            return self.persist().await;
        }

        self.persisted_revision.set(revision);
        self.sync_status.set(SyncStatus::Synced);
        self.notify(&self.snapshot());
        Ok(())
    }

    /// Append an item. Blank text is ignored and returns `None`.
    pub async fn add(&self, text: &str) -> StoreResult<Option<TodoId>> {
        self.apply("add", |list| list.add(text)).await
    }

    pub async fn toggle(&self, id: TodoId) -> StoreResult<Outcome> {
        self.apply("toggle", |list| list.toggle(id)).await.map(outcome)
    }

    pub async fn rename(&self, id: TodoId, new_text: &str) -> StoreResult<Outcome> {
        self.apply("rename", |list| list.rename(id, new_text)).await.map(outcome)
    }

    pub async fn remove(&self, id: TodoId) -> StoreResult<Outcome> {
        self.apply("remove", |list| list.remove(id)).await.map(outcome)
    }

    /// Move the item at `from_index` to `to_index`
    pub async fn reorder(&self, from_index: usize, to_index: usize) -> StoreResult<Outcome> {
        self.apply("reorder", |list| list.reorder(from_index, to_index))
            .await
            .map(outcome)
    }

    /// Move `id` into the slot `target_id` holds right now
    pub async fn move_item(&self, id: TodoId, target_id: TodoId) -> StoreResult<Outcome> {
        self.apply("move", |list| list.move_item(id, target_id))
            .await
            .map(outcome)
    }

    /// Commit a finished drag gesture
    pub async fn relocate(&self, relocation: Relocation) -> StoreResult<Outcome> {
        self.move_item(relocation.item, relocation.target).await
    }

    /// Write the current list again, e.g. after a failed write
    pub async fn sync(&self) -> StoreResult<()> {
        self.persist().await
    }

    async fn apply<T>(
        &self,
        op: &str,
        mutate: impl FnOnce(&mut TodoList) -> TodoResult<T>,
    ) -> StoreResult<Option<T>> {
        drop(self.load_gate.read().await);
        let result = mutate(&mut *self.list.borrow_mut());
        match result {
            Ok(value) => {
                self.bump_revision();
                self.persist().await?;
                Ok(Some(value))
            }
            Err(e) if e.is_ignorable() => {
                debug!("{} ignored: {}", op, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn persist(&self) -> StoreResult<()> {
        let _gate = self.write_gate.lock().await;

        let revision = self.revision.get();
        let snapshot = self.snapshot();

        if self.persisted_revision.get() >= revision {
            debug!("revision {} already written", revision);
        } else {
            let key = self.config.storage_key.as_str();
            if let Err(e) = self.storage.set(key, &snapshot).await {
                warn!("write of revision {} to '{}' failed: {}", revision, key, e);
                self.sync_status.set(SyncStatus::Unsynced);
                return Err(e.into());
            }
            debug!("wrote revision {} ({} items)", revision, snapshot.len());
            self.persisted_revision.set(revision);
        }

        self.sync_status.set(SyncStatus::Synced);
        self.notify(&snapshot);
        Ok(())
    }

    fn bump_revision(&self) -> u64 {
        let next = self.revision.get() + 1;
        self.revision.set(next);
        next
    }

    fn notify(&self, items: &[TodoItem]) {
        let render = self.render.borrow().clone();
        if let Some(render) = render {
            render(items);
        }
    }
}

fn outcome<T>(applied: Option<T>) -> Outcome {
    match applied {
        Some(_) => Outcome::Applied,
        None => Outcome::Unchanged,
    }
}

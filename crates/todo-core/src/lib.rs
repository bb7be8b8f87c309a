//! To-do list engine
//!
//! Layered like the popup uses it:
//! - domain: items, the ordered list, edit mode and the drag controller
//! - storage: the async persistence boundary
//! - store: the list reconciled with storage, notifying a renderer

pub mod config;
pub mod domain;
pub mod storage;
pub mod store;

pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use domain::{
    count_label, DragController, DragState, EditMode, Relocation, SaveAction, StorageError,
    TodoError, TodoId, TodoItem, TodoList, TodoResult,
};
pub use storage::{MemoryStorage, StorageAdapter};
pub use store::{Outcome, RenderTrigger, StoreResult, SyncStatus, TodoStore};

//! Popup View State
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The list itself
//! is owned by `TodoStore`; this only mirrors what was last rendered.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{EditMode, SyncStatus, TodoItem};

#[derive(Clone, Debug, Default, Store)]
pub struct PopupState {
    /// Items as of the last acknowledged write
    pub items: Vec<TodoItem>,
    /// Add section or edit section
    pub edit_mode: EditMode,
    pub sync_status: SyncStatus,
    /// Message of the last failed operation
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type PopupStore = Store<PopupState>;

/// Replace the rendered list
pub fn store_set_items(state: &PopupStore, items: &[TodoItem]) {
    *state.items().write() = items.to_vec();
}

/// Leave edit mode, discarding any draft
pub fn store_cancel_edit(state: &PopupStore) {
    state.edit_mode().write().cancel();
}

//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use todo_core::{StoreResult, TodoStore};

use crate::storage::ChromeStorage;
use crate::store::{store_set_items, PopupStateStoreFields, PopupStore};

/// The list engine as used by the popup
pub type PopupTodoStore = TodoStore<ChromeStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The single list store for this popup
    todos: StoredValue<Rc<PopupTodoStore>, LocalStorage>,
    /// Reactive view state
    pub state: PopupStore,
}

impl AppContext {
    pub fn new(todos: PopupTodoStore, state: PopupStore) -> Self {
        Self {
            todos: StoredValue::new_local(Rc::new(todos)),
            state,
        }
    }

    pub fn todos(&self) -> Rc<PopupTodoStore> {
        self.todos.get_value()
    }

    /// Run a store operation in the background and reflect how it went.
    ///
    /// On failure the view falls back to the in-memory list, which keeps the
    /// optimistic change, and the error is shown.
    pub fn run<F, Fut, T>(&self, op: F)
    where
        F: FnOnce(Rc<PopupTodoStore>) -> Fut + 'static,
        Fut: Future<Output = StoreResult<T>> + 'static,
        T: 'static,
    {
        self.run_then(op, |_| {});
    }

    /// Like [`run`](Self::run), calling `on_ok` with the value once the
    /// operation succeeds
    pub fn run_then<F, Fut, T, K>(&self, op: F, on_ok: K)
    where
        F: FnOnce(Rc<PopupTodoStore>) -> Fut + 'static,
        Fut: Future<Output = StoreResult<T>> + 'static,
        T: 'static,
        K: FnOnce(T) + 'static,
    {
        let ctx = *self;
        spawn_local(async move {
            let todos = ctx.todos();
            let result = op(todos.clone()).await;
            match result {
                Ok(value) => {
                    *ctx.state.last_error().write() = None;
                    on_ok(value);
                }
                Err(e) => {
                    error!("operation failed: {}", e);
                    store_set_items(&ctx.state, &todos.snapshot());
                    *ctx.state.last_error().write() = Some(e.to_string());
                }
            }
            *ctx.state.sync_status().write() = todos.sync_status();
        });
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

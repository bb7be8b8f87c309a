//! To-Do Popup App
//!
//! Root component: builds the list store once per popup and lays out the
//! add/edit section, the list and the footer.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{count_label, TodoStore};

use crate::components::{EditForm, NewTodoForm, SyncNotice, TodoListView};
use crate::config::PopupConfig;
use crate::context::AppContext;
use crate::storage::ChromeStorage;
use crate::store::{store_set_items, PopupState, PopupStateStoreFields};

#[component]
pub fn App(config: PopupConfig) -> impl IntoView {
    let state = Store::new(PopupState::default());

    let storage = ChromeStorage::new(config.storage_area, config.retry);
    let todos = TodoStore::new(storage, config.store)
        .with_render_trigger(move |items| store_set_items(&state, items));

    let ctx = AppContext::new(todos, state);
    provide_context(ctx);

    // Load on mount
    ctx.run(|todos| async move { todos.load().await });

    let editing = move || state.edit_mode().with(|mode| mode.is_editing());

    view! {
        <div class="popup">
            <h1>"My To-Do List"</h1>

            <Show when=move || !editing() fallback=|| view! { <EditForm /> }>
                <NewTodoForm />
            </Show>

            <SyncNotice />

            <TodoListView />

            <p class="todo-count">{move || state.items().with(|items| count_label(items.len()))}</p>
        </div>
    }
}

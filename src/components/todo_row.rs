//! Todo Row Component
//!
//! Checkbox, text, and Edit/Delete actions for one item.

use leptos::prelude::*;
use todo_core::{EditMode, TodoItem};

use crate::context::use_app_context;
use crate::store::PopupStateStoreFields;

#[component]
pub fn TodoRow(
    item: TodoItem,
    /// True right after a drag ended; clicks are ignored meanwhile
    suppress_click: ReadSignal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let id = item.id;
    let completed = item.completed;
    let text = item.text;

    let start_edit = move |_: web_sys::MouseEvent| {
        if suppress_click.get_untracked() { return; }
        let mode = state.items().with(|items| EditMode::begin(items, id));
        if let Some(mode) = mode {
            *state.edit_mode().write() = mode;
        }
    };

    view! {
        <div class=if completed { "todo-item completed" } else { "todo-item" }>
            <input
                type="checkbox"
                checked=completed
                on:change=move |_| ctx.run(move |todos| async move { todos.toggle(id).await })
            />
            <label>{text}</label>
            <div class="todo-actions">
                <button class="edit-icon" on:click=start_edit>"Edit"</button>
                <button
                    class="delete-icon"
                    on:click=move |_| {
                        if suppress_click.get_untracked() { return; }
                        ctx.run(move |todos| async move { todos.remove(id).await });
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

//! Edit Form Component
//!
//! Rename the item selected for editing. Shown instead of the add form.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use todo_core::SaveAction;

use crate::context::use_app_context;
use crate::store::{store_cancel_edit, PopupStateStoreFields};

#[component]
pub fn EditForm() -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let save = move || {
        let action = state.edit_mode().with(|mode| mode.save());
        match action {
            SaveAction::Rename { id, text } => {
                store_cancel_edit(&state);
                ctx.run(move |todos| async move { todos.rename(id, &text).await });
            }
            // Blank draft keeps the form open
            SaveAction::KeepEditing | SaveAction::Nothing => {}
        }
    };

    view! {
        <div class="edit-section">
            <input
                type="text"
                prop:value=move || state.edit_mode().with(|mode| mode.draft().unwrap_or_default().to_string())
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        state.edit_mode().write().update_draft(input.value());
                    }
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        save();
                    }
                }
            />
            <button class="save-btn" on:click=move |_| save()>"Save"</button>
            <button class="cancel-btn" on:click=move |_| store_cancel_edit(&state)>"Cancel"</button>
        </div>
    }
}

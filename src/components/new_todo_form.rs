//! New Todo Form Component
//!
//! Text input and Add button; Enter submits.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get();
        if text.trim().is_empty() { return; }

        ctx.run_then(
            move |todos| async move { todos.add(&text).await },
            move |added| {
                if added.is_some() {
                    set_new_text.set(String::new());
                }
            },
        );
    };

    view! {
        <form class="add-todo-section" on:submit=create_todo>
            <input
                type="text"
                placeholder="Add a new task..."
                prop:value=move || new_text.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_new_text.set(input.value());
                    }
                }
            />
            <button type="submit">"Add"</button>
        </form>
    }
}

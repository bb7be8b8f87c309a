//! Sync Notice Component
//!
//! Shown while the last write failed; offers to write again.

use leptos::prelude::*;
use todo_core::SyncStatus;

use crate::context::use_app_context;
use crate::store::PopupStateStoreFields;

#[component]
pub fn SyncNotice() -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let unsynced = move || state.sync_status().get() == SyncStatus::Unsynced;
    let message = move || state.last_error().get().unwrap_or_else(|| "Changes are not saved".to_string());

    view! {
        <Show when=unsynced>
            <div class="sync-notice">
                <span class="sync-notice-text">{message}</span>
                <button
                    class="retry-btn"
                    on:click=move |_| ctx.run(|todos| async move { todos.sync().await })
                >
                    "Retry"
                </button>
            </div>
        </Show>
    }
}

//! Todo List View Component
//!
//! Renders the list and reorders it by dragging rows.
//! Pointer tracking comes from leptos-dragdrop; `DragController` decides
//! what a drop means.

use leptos::prelude::*;
use todo_core::{DragController, TodoId};

use crate::components::TodoRow;
use crate::context::{use_app_context, AppContext};
use crate::store::PopupStateStoreFields;

use leptos_dragdrop::*;

/// Feeds pointer gestures into the drag controller and commits drops
#[derive(Clone, Copy)]
struct ReorderHandler {
    controller: RwSignal<DragController>,
    ctx: AppContext,
}

impl DragHandler<TodoId> for ReorderHandler {
    fn drag_started(&self, key: TodoId) {
        self.controller.update(|dnd| dnd.start(key));
    }

    fn drag_entered(&self, key: TodoId) {
        self.controller.update(|dnd| dnd.hover(key));
    }

    fn drag_left(&self) {
        self.controller.update(|dnd| dnd.leave());
    }

    fn dropped(&self, target: TodoId) {
        let relocation = self.controller.try_update(|dnd| dnd.drop(target)).flatten();
        if let Some(relocation) = relocation {
            log::debug!("drop: {} onto {}", relocation.item, relocation.target);
            self.ctx.run(move |todos| async move { todos.relocate(relocation).await });
        }
    }

    fn cancelled(&self) {
        self.controller.update(|dnd| dnd.end());
    }
}

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let controller = RwSignal::new(DragController::new());
    let handler = ReorderHandler { controller, ctx };

    let dnd = create_dnd_signals::<TodoId>();
    bind_global_handlers(dnd, handler);

    view! {
        <ul class="todo-list">
            <For
                each=move || state.items().get()
                key=|item| (item.id, item.text.clone(), item.completed)
                children=move |item| {
                    let id = item.id;

                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_row_mouseenter(dnd, id, handler);
                    let on_mouseleave = make_on_mouseleave(dnd, handler);

                    let row_class = move || {
                        let mut c = String::from("todo-row");
                        controller.with(|dnd| {
                            if dnd.source() == Some(id) { c.push_str(" dragging"); }
                            if dnd.over() == Some(id) { c.push_str(" drag-over"); }
                        });
                        c
                    };

                    view! {
                        <li
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <TodoRow item=item suppress_click=dnd.drag_just_ended_read />
                        </li>
                    }
                }
            />
        </ul>
    }
}

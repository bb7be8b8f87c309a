//! Leptos DragDrop Utilities
//!
//! Mouse-event drag and drop for reordering flat lists in Leptos.
//! Uses movement threshold to distinguish click from drag.
//!
//! This crate only tracks the pointer. What a drag means is decided by a
//! [`DragHandler`] supplied by the caller.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Receives gesture transitions for rows keyed by `K`
pub trait DragHandler<K>: Clone + 'static {
    /// Pointer moved past the threshold while pressed on `key`
    fn drag_started(&self, key: K);
    /// Pointer entered row `key` during a drag
    fn drag_entered(&self, key: K);
    /// Pointer left a row during a drag
    fn drag_left(&self);
    /// Button released over row `target`
    fn dropped(&self, target: K);
    /// Button released outside any row
    fn cancelled(&self);
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<K: 'static> {
    pub dragging_read: ReadSignal<Option<K>>,
    pub dragging_write: WriteSignal<Option<K>>,
    /// Row under the pointer while dragging
    pub over_read: ReadSignal<Option<K>>,
    pub over_write: WriteSignal<Option<K>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<K>>,
    pub pending_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long clicks are suppressed after a drag ends
const CLICK_SUPPRESS_MS: i32 = 100;

/// True once the pointer has moved far enough from the press to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<K>() -> DndSignals<K>
where
    K: Copy + Send + Sync + 'static,
{
    let (dragging_read, dragging_write) = signal(None::<K>);
    let (over_read, over_write) = signal(None::<K>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<K>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        over_read,
        over_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag<K>(dnd: &DndSignals<K>)
where
    K: Copy + Send + Sync + 'static,
{
    let was_dragging = dnd.dragging_read.get_untracked().is_some();
    dnd.dragging_write.set(None);
    dnd.over_write.set(None);
    dnd.pending_write.set(None);

    if !was_dragging {
        return;
    }

    // Swallow the click that follows the mouseup of a drag
    dnd.drag_just_ended_write.set(true);
    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(key));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Bind document mousemove - starts drag if moved enough
fn bind_global_mousemove<K, H>(dnd: DndSignals<K>, handler: H)
where
    K: Copy + Send + Sync + 'static,
    H: DragHandler<K>,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();

        if let (Some(key), None) = (pending, dnd.dragging_read.get_untracked()) {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(Some(key));
                handler.drag_started(key);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for rows
pub fn make_on_row_mouseenter<K, H>(dnd: DndSignals<K>, key: K, handler: H) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
    H: DragHandler<K>,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != key {
                dnd.over_write.set(Some(key));
                handler.drag_entered(key);
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, H>(dnd: DndSignals<K>, handler: H) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Copy + Send + Sync + 'static,
    H: DragHandler<K>,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.over_write.set(None);
            handler.drag_left();
        }
    }
}

/// Bind document mouseup (drop detection) and mousemove (drag start)
pub fn bind_global_handlers<K, H>(dnd: DndSignals<K>, handler: H)
where
    K: Copy + Send + Sync + 'static,
    H: DragHandler<K>,
{
    use wasm_bindgen::closure::Closure;

    let on_drop = handler.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let over = dnd.over_read.get_untracked();

        match (dragging, over) {
            (Some(_), Some(target)) => {
                end_drag(&dnd);
                on_drop.dropped(target);
            }
            (Some(_), None) => {
                end_drag(&dnd);
                on_drop.cancelled();
            }
            // Plain click; the click event fires naturally on the element
            (None, _) => end_drag(&dnd),
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd, handler);
}

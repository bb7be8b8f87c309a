//! Drag-Reorder Controller
//!
//! Tracks one pointer-drag gesture over the rendered list. Items are tracked
//! by id so a list change mid-gesture cannot move the wrong item.

use super::todo::TodoId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: TodoId,
        /// Row under the pointer, for highlighting only
        over: Option<TodoId>,
    },
}

/// Result of a completed drop: move `item` into the slot held by `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub item: TodoId,
    pub target: TodoId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<TodoId> {
        match self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Row currently highlighted as the drop target
    pub fn over(&self) -> Option<TodoId> {
        match self.state {
            DragState::Dragging { over, .. } => over,
            DragState::Idle => None,
        }
    }

    pub fn start(&mut self, id: TodoId) {
        self.state = DragState::Dragging {
            source: id,
            over: None,
        };
    }

    /// Pointer entered a row. Never mutates the list.
    pub fn hover(&mut self, id: TodoId) {
        if let DragState::Dragging { source, over } = &mut self.state {
            *over = if *source == id { None } else { Some(id) };
        }
    }

    /// Pointer left a row
    pub fn leave(&mut self) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = None;
        }
    }

    /// Finish the gesture on `target`. Always returns to idle.
    pub fn drop(&mut self, target: TodoId) -> Option<Relocation> {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Dragging { source, .. } if source != target => Some(Relocation {
                item: source,
                target,
            }),
            _ => None,
        }
    }

    /// Gesture cancelled without a drop
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_on_other_row() {
        let mut dnd = DragController::new();
        dnd.start(TodoId(1));
        dnd.hover(TodoId(3));
        assert_eq!(dnd.over(), Some(TodoId(3)));

        let relocation = dnd.drop(TodoId(3));
        assert_eq!(
            relocation,
            Some(Relocation {
                item: TodoId(1),
                target: TodoId(3)
            })
        );
        assert_eq!(dnd.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut dnd = DragController::new();
        dnd.start(TodoId(2));
        dnd.hover(TodoId(2));
        assert_eq!(dnd.over(), None);
        assert_eq!(dnd.drop(TodoId(2)), None);
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn test_drop_while_idle() {
        let mut dnd = DragController::new();
        assert_eq!(dnd.drop(TodoId(1)), None);
    }

    #[test]
    fn test_end_cancels() {
        let mut dnd = DragController::new();
        dnd.start(TodoId(4));
        dnd.hover(TodoId(5));
        dnd.end();
        assert_eq!(dnd.state(), DragState::Idle);
        assert_eq!(dnd.drop(TodoId(5)), None);
    }

    #[test]
    fn test_hover_ignored_when_idle() {
        let mut dnd = DragController::new();
        dnd.hover(TodoId(1));
        assert_eq!(dnd.state(), DragState::Idle);
    }

    #[test]
    fn test_leave_clears_highlight() {
        let mut dnd = DragController::new();
        dnd.start(TodoId(1));
        dnd.hover(TodoId(2));
        dnd.leave();
        assert_eq!(dnd.over(), None);
        assert_eq!(dnd.source(), Some(TodoId(1)));
    }
}

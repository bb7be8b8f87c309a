//! Domain Layer
//!
//! Contains the to-do entities and the pure, synchronous list logic.
//! Nothing in here touches storage or awaits anything.

mod todo;
mod error;
mod list;
mod edit;
mod drag;

pub use todo::{TodoId, TodoItem, count_label};
pub use error::{TodoError, TodoResult, StorageError};
pub use list::TodoList;
pub use edit::{EditMode, SaveAction};
pub use drag::{DragController, DragState, Relocation};

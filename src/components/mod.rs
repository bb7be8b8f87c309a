//! UI Components
//!
//! Leptos components of the popup.

mod new_todo_form;
mod edit_form;
mod todo_row;
mod todo_list_view;
mod sync_notice;

pub use new_todo_form::NewTodoForm;
pub use edit_form::EditForm;
pub use todo_row::TodoRow;
pub use todo_list_view::TodoListView;
pub use sync_notice::SyncNotice;

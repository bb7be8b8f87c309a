//! Edit Mode
//!
//! The popup is either adding items or renaming exactly one of them.

use super::todo::{TodoId, TodoItem};

/// Which item, if any, is being renamed, with its unsaved text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    NotEditing,
    Editing { id: TodoId, draft: String },
}

/// What saving the current edit should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    /// Commit the trimmed draft, then leave edit mode
    Rename { id: TodoId, text: String },
    /// Draft is blank; stay in edit mode
    KeepEditing,
    /// Not editing anything
    Nothing,
}

impl EditMode {
    /// Start editing `id`, with the draft set to its current text.
    ///
    /// Returns `None` for an unknown id. Any previous session is discarded
    /// by the caller replacing its mode with the returned one.
    pub fn begin(items: &[TodoItem], id: TodoId) -> Option<EditMode> {
        items.iter().find(|item| item.id == id).map(|item| EditMode::Editing {
            id,
            draft: item.text.clone(),
        })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<TodoId> {
        match self {
            EditMode::Editing { id, .. } => Some(*id),
            EditMode::NotEditing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditMode::Editing { draft, .. } => Some(draft),
            EditMode::NotEditing => None,
        }
    }

    /// Replace the draft text; ignored when not editing
    pub fn update_draft(&mut self, text: impl Into<String>) {
        if let EditMode::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    pub fn save(&self) -> SaveAction {
        match self {
            EditMode::NotEditing => SaveAction::Nothing,
            EditMode::Editing { id, draft } => {
                let text = draft.trim();
                if text.is_empty() {
                    SaveAction::KeepEditing
                } else {
                    SaveAction::Rename {
                        id: *id,
                        text: text.to_string(),
                    }
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = EditMode::NotEditing;
    }
}

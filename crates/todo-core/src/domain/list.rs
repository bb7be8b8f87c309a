//! Todo List
//!
//! The ordered sequence of items plus the id counter. Every operation runs
//! to completion synchronously; the store decides what gets persisted.

use std::collections::HashSet;

use super::error::{TodoError, TodoResult};
use super::todo::{TodoId, TodoItem};

/// Ordered to-do items with unique ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
    /// Next id to hand out, greater than every id in `items`. `None` once
    /// stored data has used up the counter; ids then come from the lowest
    /// free value.
    next_id: Option<u64>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Build a list from persisted items.
    ///
    /// Later items that reuse an earlier id get a fresh one. Returns the list
    /// and the number of ids that had to be reassigned.
    pub fn from_items(items: Vec<TodoItem>) -> (Self, usize) {
        let max_id = items.iter().map(|item| item.id.0).max().unwrap_or(0);
        let mut list = Self {
            items: Vec::with_capacity(items.len()),
            next_id: max_id.checked_add(1),
        };

        let mut seen = HashSet::with_capacity(items.len());
        let mut repaired = 0;
        for mut item in items {
            if !seen.insert(item.id) {
                item.id = list.allocate_id();
                seen.insert(item.id);
                repaired += 1;
            }
            list.items.push(item);
        }

        (list, repaired)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Current display position of an item
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Append a new item. Empty text after trimming is rejected.
    pub fn add(&mut self, text: &str) -> TodoResult<TodoId> {
        let text = non_empty(text)?;
        let id = self.allocate_id();
        self.items.push(TodoItem::new(id, text));
        Ok(id)
    }

    /// Flip completion. Returns the new value.
    pub fn toggle(&mut self, id: TodoId) -> TodoResult<bool> {
        let item = self.get_mut(id)?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    pub fn rename(&mut self, id: TodoId, new_text: &str) -> TodoResult<()> {
        let text = non_empty(new_text)?;
        let item = self.get_mut(id)?;
        item.text = text.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: TodoId) -> TodoResult<TodoItem> {
        let index = self
            .position(id)
            .ok_or_else(|| TodoError::NotFound(format!("item {}", id)))?;
        Ok(self.items.remove(index))
    }

    /// Move the item at `from` so that it ends up at index `to`.
    ///
    /// One relocation, not a swap: `[A, B, C]` with `(0, 2)` gives `[B, C, A]`.
    pub fn reorder(&mut self, from: usize, to: usize) -> TodoResult<()> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(TodoError::NotFound(format!(
                "position {} -> {} in a list of {}",
                from, to, len
            )));
        }
        if from == to {
            return Err(TodoError::NotFound(format!("item already at position {}", to)));
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// Move `id` into the slot currently held by `target`.
    ///
    /// Positions are resolved against the list as it is now, not as it was
    /// when a drag gesture started.
    pub fn move_item(&mut self, id: TodoId, target: TodoId) -> TodoResult<()> {
        let from = self
            .position(id)
            .ok_or_else(|| TodoError::NotFound(format!("item {}", id)))?;
        let to = self
            .position(target)
            .ok_or_else(|| TodoError::NotFound(format!("drop target {}", target)))?;
        self.reorder(from, to)
    }

    fn get_mut(&mut self, id: TodoId) -> TodoResult<&mut TodoItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| TodoError::NotFound(format!("item {}", id)))
    }

    fn allocate_id(&mut self) -> TodoId {
        match self.next_id {
            Some(next) => {
                self.next_id = next.checked_add(1);
                TodoId(next)
            }
            None => self.lowest_free_id(),
        }
    }

    fn lowest_free_id(&self) -> TodoId {
        let taken: HashSet<u64> = self.items.iter().map(|item| item.id.0).collect();
        let mut id = 1;
        while taken.contains(&id) {
            id += 1;
        }
        TodoId(id)
    }
}

fn non_empty(text: &str) -> TodoResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation("text is empty".to_string()));
    }
    Ok(trimmed)
}

//! Todo item model.

use serde::{Deserialize, Serialize};

/// Stable todo identifier, scoped to its owning list.
pub type TodoId = u64;

/// A named task with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an incomplete todo.
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

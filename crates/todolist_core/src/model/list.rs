//! Todo list model.
//!
//! # Responsibility
//! - Hold one named list and its ordered todos.
//! - Provide completion aggregates used by views and ordering.
//!
//! # Invariants
//! - `todos` keeps insertion order; display reordering happens elsewhere.
//! - A list is complete only when it has at least one todo and none remain.
//! - Todo ids are unique within one list.

use crate::model::todo::{Todo, TodoId};
use serde::{Deserialize, Serialize};

/// Stable list identifier, unique within one session.
pub type ListId = u64;

/// A named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Returns whether the list has todos and every one is completed.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos_remaining() == 0
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    pub fn todos_remaining(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn find_todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn find_todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Next free todo id (`max + 1`, or `1` for an empty list).
    pub fn next_todo_id(&self) -> TodoId {
        next_id(self.todos.iter().map(|todo| todo.id))
    }

    /// Appends a new incomplete todo and returns its id.
    ///
    /// The name is stored as given; callers validate first.
    pub fn push_todo(&mut self, name: impl Into<String>) -> TodoId {
        let id = self.next_todo_id();
        self.todos.push(Todo::new(id, name));
        id
    }

    /// Removes the todo with `id`, returning it when present.
    pub fn remove_todo(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id == id)?;
        Some(self.todos.remove(index))
    }

    /// Marks every todo completed and returns how many changed state.
    pub fn complete_all(&mut self) -> usize {
        let mut changed = 0;
        for todo in self.todos.iter_mut().filter(|todo| !todo.completed) {
            todo.completed = true;
            changed += 1;
        }
        changed
    }
}

/// Returns `max(ids) + 1`, or `1` when `ids` is empty.
pub fn next_id(ids: impl IntoIterator<Item = u64>) -> u64 {
    ids.into_iter().max().map_or(1, |max| max + 1)
}

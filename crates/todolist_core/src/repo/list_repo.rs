//! List repository contract and session-backed implementation.
//!
//! # Responsibility
//! - Provide lookup/insert/remove over the lists carried by one session.
//! - Assign stable list ids.
//!
//! # Invariants
//! - Removing a list never changes the ids or relative order of the others.
//! - Lookups are by stable id only; positions are never exposed as ids.

use crate::model::list::{next_id, ListId, TodoList};
use crate::model::todo::TodoId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Lookup failure for list/todo access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    ListNotFound(ListId),
    TodoNotFound { list_id: ListId, todo_id: TodoId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::TodoNotFound { list_id, todo_id } => {
                write!(f, "todo not found: list={list_id} todo={todo_id}")
            }
        }
    }
}

impl Error for RepoError {}

/// Repository interface over one session's lists.
pub trait ListRepository {
    /// All lists in insertion order.
    fn lists(&self) -> &[TodoList];
    fn get_list(&self, id: ListId) -> Option<&TodoList>;
    fn get_list_mut(&mut self, id: ListId) -> Option<&mut TodoList>;
    fn insert_list(&mut self, list: TodoList);
    fn remove_list(&mut self, id: ListId) -> RepoResult<TodoList>;
    fn next_list_id(&self) -> ListId;

    /// Returns whether any list other than `except` is named `name`.
    fn contains_name(&self, name: &str, except: Option<ListId>) -> bool {
        self.lists()
            .iter()
            .any(|list| list.name == name && Some(list.id) != except)
    }
}

/// Repository borrowing the list collection stored in a user session.
pub struct SessionListRepository<'s> {
    lists: &'s mut Vec<TodoList>,
}

impl<'s> SessionListRepository<'s> {
    pub fn new(lists: &'s mut Vec<TodoList>) -> Self {
        Self { lists }
    }
}

impl ListRepository for SessionListRepository<'_> {
    fn lists(&self) -> &[TodoList] {
        self.lists.as_slice()
    }

    fn get_list(&self, id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == id)
    }

    fn get_list_mut(&mut self, id: ListId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    fn insert_list(&mut self, list: TodoList) {
        self.lists.push(list);
    }

    fn remove_list(&mut self, id: ListId) -> RepoResult<TodoList> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or(RepoError::ListNotFound(id))?;
        Ok(self.lists.remove(index))
    }

    fn next_list_id(&self) -> ListId {
        next_id(self.lists.iter().map(|list| list.id))
    }
}

//! List use-case service.
//!
//! # Responsibility
//! - Validate names and enforce list-name uniqueness before mutation.
//! - Provide the list/todo operations behind every HTTP route.
//!
//! # Invariants
//! - Existence of the target list is checked before its input is validated.
//! - Name length is checked before uniqueness.
//! - A list may keep its own name on rename; it may not take another list's.
//! - `Display` of `ListServiceError` is the user-facing message.
//! - `ListServiceError::kind` is the only form of the error that gets logged.

use crate::model::list::{ListId, TodoList};
use crate::model::name::{normalize_name, NameValidationError, NAME_MAX_CHARS, NAME_MIN_CHARS};
use crate::model::todo::TodoId;
use crate::repo::list_repo::{ListRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ListServiceError>;

/// Service error for list use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListServiceError {
    InvalidListName(NameValidationError),
    /// Another list already uses this (normalized) name.
    DuplicateListName(String),
    InvalidTodoName(NameValidationError),
    ListNotFound(ListId),
    TodoNotFound { list_id: ListId, todo_id: TodoId },
}

impl ListServiceError {
    /// Whether the error came from user input rather than a stale id.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidListName(_) | Self::DuplicateListName(_) | Self::InvalidTodoName(_)
        )
    }

    /// Stable machine-readable kind for log events.
    ///
    /// Never carries user-entered names; log ids alongside it instead.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidListName(_) => "invalid_list_name",
            Self::DuplicateListName(_) => "duplicate_list_name",
            Self::InvalidTodoName(_) => "invalid_todo_name",
            Self::ListNotFound(_) => "list_not_found",
            Self::TodoNotFound { .. } => "todo_not_found",
        }
    }
}

impl Display for ListServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidListName(_) => write!(
                f,
                "List name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
            ),
            Self::DuplicateListName(_) => write!(f, "List name must be unique."),
            Self::InvalidTodoName(_) => write!(
                f,
                "Todo name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
            ),
            Self::ListNotFound(_) => write!(f, "The specified list was not found."),
            Self::TodoNotFound { .. } => write!(f, "The specified todo was not found."),
        }
    }
}

impl Error for ListServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidListName(err) | Self::InvalidTodoName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ListServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ListNotFound(id) => Self::ListNotFound(id),
            RepoError::TodoNotFound { list_id, todo_id } => Self::TodoNotFound { list_id, todo_id },
        }
    }
}

/// List service facade over repository implementations.
pub struct ListService<R: ListRepository> {
    repo: R,
}

impl<R: ListRepository> ListService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All lists in insertion order.
    pub fn lists(&self) -> &[TodoList] {
        self.repo.lists()
    }

    pub fn get_list(&self, id: ListId) -> ServiceResult<&TodoList> {
        self.repo.get_list(id).ok_or(ListServiceError::ListNotFound(id))
    }

    /// Creates a list and returns its new stable id.
    pub fn create_list(&mut self, raw_name: &str) -> ServiceResult<ListId> {
        let name = self.checked_list_name(raw_name, None)?;
        let id = self.repo.next_list_id();
        self.repo.insert_list(TodoList::new(id, name));
        Ok(id)
    }

    /// Renames an existing list.
    pub fn rename_list(&mut self, id: ListId, raw_name: &str) -> ServiceResult<()> {
        self.get_list(id)?;
        let name = self.checked_list_name(raw_name, Some(id))?;
        self.list_mut(id)?.name = name;
        Ok(())
    }

    /// Removes exactly one list; the others keep their ids and order.
    pub fn delete_list(&mut self, id: ListId) -> ServiceResult<TodoList> {
        Ok(self.repo.remove_list(id)?)
    }

    /// Appends an incomplete todo to a list and returns its id.
    pub fn add_todo(&mut self, list_id: ListId, raw_name: &str) -> ServiceResult<TodoId> {
        let list = self.list_mut(list_id)?;
        let name = normalize_name(raw_name).map_err(ListServiceError::InvalidTodoName)?;
        Ok(list.push_todo(name))
    }

    pub fn set_todo_completed(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> ServiceResult<()> {
        let todo = self
            .list_mut(list_id)?
            .find_todo_mut(todo_id)
            .ok_or(ListServiceError::TodoNotFound { list_id, todo_id })?;
        todo.set_completed(completed);
        Ok(())
    }

    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> ServiceResult<()> {
        self.list_mut(list_id)?
            .remove_todo(todo_id)
            .map(|_| ())
            .ok_or(ListServiceError::TodoNotFound { list_id, todo_id })
    }

    /// Completes every todo in one list; returns how many changed.
    pub fn complete_all(&mut self, list_id: ListId) -> ServiceResult<usize> {
        Ok(self.list_mut(list_id)?.complete_all())
    }

    fn list_mut(&mut self, id: ListId) -> ServiceResult<&mut TodoList> {
        self.repo
            .get_list_mut(id)
            .ok_or(ListServiceError::ListNotFound(id))
    }

    fn checked_list_name(&self, raw_name: &str, except: Option<ListId>) -> ServiceResult<String> {
        let name = normalize_name(raw_name).map_err(ListServiceError::InvalidListName)?;
        if self.repo.contains_name(&name, except) {
            return Err(ListServiceError::DuplicateListName(name));
        }
        Ok(name)
    }
}

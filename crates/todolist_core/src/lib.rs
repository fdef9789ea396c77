//! Core domain logic for session-scoped todo lists.
//! This crate is the single source of truth for list/todo invariants.

pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{ListId, TodoList};
pub use model::name::{normalize_name, NameValidationError, NAME_MAX_CHARS};
pub use model::todo::{Todo, TodoId};
pub use ordering::{sort_lists, sort_todos};
pub use repo::list_repo::{ListRepository, RepoError, RepoResult, SessionListRepository};
pub use service::list_service::{ListService, ListServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Domain model for session-scoped todo lists.
//!
//! # Responsibility
//! - Define the list/todo records carried inside a user session.
//! - Own name normalization rules shared by list and todo writes.
//!
//! # Invariants
//! - Every list and todo is identified by a stable integer id.
//! - Ids are never derived from a position in a collection.

pub mod list;
pub mod name;
pub mod todo;

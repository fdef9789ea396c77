//! Repository layer over session-held list collections.
//!
//! # Responsibility
//! - Define the data access contract used by the list service.
//! - Keep collection lookups and id assignment out of business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic `NotFound` errors instead of panicking on
//!   stale ids.

pub mod list_repo;

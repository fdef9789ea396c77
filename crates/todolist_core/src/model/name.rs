//! Name normalization for lists and todos.
//!
//! # Invariants
//! - Names are trimmed before any length check.
//! - Length is measured in characters, not bytes.
//! - A valid name has between `NAME_MIN_CHARS` and `NAME_MAX_CHARS` characters.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 1;
pub const NAME_MAX_CHARS: usize = 100;

/// Rejection reason for a list or todo name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    /// Nothing left after trimming.
    Empty,
    /// More than `NAME_MAX_CHARS` characters after trimming.
    TooLong { chars: usize },
}

impl Display for NameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { chars } => write!(
                f,
                "name has {chars} characters; at most {NAME_MAX_CHARS} allowed"
            ),
        }
    }
}

impl Error for NameValidationError {}

/// Trims `raw` and checks its length.
///
/// Returns the trimmed, owned name on success.
pub fn normalize_name(raw: &str) -> Result<String, NameValidationError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err(NameValidationError::Empty);
    }
    if chars > NAME_MAX_CHARS {
        return Err(NameValidationError::TooLong { chars });
    }
    Ok(trimmed.to_string())
}

//! The `Board` value type.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Remote-assigned board identifier.
pub type BoardId = i64;

/// A remote collection that can receive saved images.
///
/// Immutable once fetched. Two boards are equal when their ids match, so a
/// renamed board still deduplicates against its cached copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier assigned by the remote API.
    pub id: BoardId,
    /// Display title.
    pub title: String,
}

impl Board {
    #[must_use]
    pub fn new(id: BoardId, title: impl Into<String>) -> Self {
        Self { id, title: title.into() }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

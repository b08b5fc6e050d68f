//! Most-recently-used board cache.
//!
//! DESIGN
//! ======
//! The cache is a plain value; persistence is the repository's job. Keeping
//! the MRU rules here means they are tested without any storage in play.

#[cfg(test)]
#[path = "recents_test.rs"]
mod recents_test;

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Durable storage key holding the serialized cache.
pub const RECENTS_KEY: &str = "recentBoards";

/// Maximum number of boards kept.
pub const MAX_RECENTS: usize = 3;

/// Ordered boards, most recently used first, unique by id, at most
/// [`MAX_RECENTS`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Board>", into = "Vec<Board>")]
pub struct RecentBoards {
    boards: Vec<Board>,
}

impl RecentBoards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from boards in MRU order, dropping duplicates and
    /// anything past the cap.
    #[must_use]
    pub fn from_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        let mut out: Vec<Board> = Vec::with_capacity(MAX_RECENTS);
        for board in boards {
            if out.len() == MAX_RECENTS {
                break;
            }
            if !out.contains(&board) {
                out.push(board);
            }
        }
        Self { boards: out }
    }

    /// Move `board` to the front, inserting it if absent and dropping the
    /// oldest entry when the cap is exceeded.
    pub fn touch(&mut self, board: Board) {
        self.boards.retain(|b| b.id != board.id);
        self.boards.insert(0, board);
        self.boards.truncate(MAX_RECENTS);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Board] {
        &self.boards
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Board> {
        self.boards
    }
}

impl From<Vec<Board>> for RecentBoards {
    fn from(boards: Vec<Board>) -> Self {
        Self::from_boards(boards)
    }
}

impl From<RecentBoards> for Vec<Board> {
    fn from(recents: RecentBoards) -> Self {
        recents.boards
    }
}

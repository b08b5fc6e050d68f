use std::collections::HashSet;

use super::*;

#[test]
fn boards_with_same_id_are_equal_regardless_of_title() {
    assert_eq!(Board::new(7, "Moodboard"), Board::new(7, "Renamed"));
}

#[test]
fn boards_with_different_ids_are_distinct() {
    assert_ne!(Board::new(7, "Same"), Board::new(8, "Same"));
}

#[test]
fn hash_follows_id() {
    let mut set = HashSet::new();
    set.insert(Board::new(1, "a"));
    set.insert(Board::new(1, "b"));
    set.insert(Board::new(2, "a"));
    assert_eq!(set.len(), 2);
}

#[test]
fn deserializes_from_api_shape() {
    let board: Board = serde_json::from_str(r#"{"id":42,"title":"Typography"}"#).unwrap();
    assert_eq!(board.id, 42);
    assert_eq!(board.title, "Typography");
}

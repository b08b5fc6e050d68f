use super::*;

fn board(id: i64, title: &str) -> Board {
    Board::new(id, title)
}

fn ids(recents: &RecentBoards) -> Vec<i64> {
    recents.as_slice().iter().map(|b| b.id).collect()
}

// =============================================================
// touch
// =============================================================

#[test]
fn touch_existing_moves_to_front() {
    let mut recents = RecentBoards::from_boards([board(1, "A"), board(2, "B"), board(3, "C")]);
    recents.touch(board(2, "B"));
    assert_eq!(ids(&recents), vec![2, 1, 3]);
}

#[test]
fn touch_new_board_drops_oldest() {
    let mut recents = RecentBoards::from_boards([board(2, "B"), board(1, "A"), board(3, "C")]);
    recents.touch(board(4, "D"));
    assert_eq!(ids(&recents), vec![4, 2, 1]);
}

#[test]
fn touch_sequence_matches_mru_walkthrough() {
    let mut recents = RecentBoards::from_boards([board(1, "A"), board(2, "B"), board(3, "C")]);
    recents.touch(board(2, "B"));
    recents.touch(board(4, "D"));
    assert_eq!(ids(&recents), vec![4, 2, 1]);
}

#[test]
fn touch_on_empty_inserts_single() {
    let mut recents = RecentBoards::new();
    recents.touch(board(9, "Only"));
    assert_eq!(ids(&recents), vec![9]);
}

#[test]
fn touch_front_board_is_stable() {
    let mut recents = RecentBoards::from_boards([board(1, "A"), board(2, "B")]);
    recents.touch(board(1, "A"));
    assert_eq!(ids(&recents), vec![1, 2]);
}

#[test]
fn touch_replaces_stale_title() {
    let mut recents = RecentBoards::from_boards([board(1, "Old"), board(2, "B")]);
    recents.touch(board(1, "New"));
    assert_eq!(recents.as_slice()[0].title, "New");
    assert_eq!(recents.len(), 2);
}

// =============================================================
// from_boards / serde
// =============================================================

#[test]
fn from_boards_dedupes_and_caps() {
    let recents =
        RecentBoards::from_boards([board(1, "A"), board(1, "A again"), board(2, "B"), board(3, "C"), board(4, "D")]);
    assert_eq!(ids(&recents), vec![1, 2, 3]);
}

#[test]
fn deserializing_oversized_list_enforces_cap() {
    let raw = r#"[{"id":1,"title":"a"},{"id":2,"title":"b"},{"id":3,"title":"c"},{"id":4,"title":"d"}]"#;
    let recents: RecentBoards = serde_json::from_str(raw).unwrap();
    assert_eq!(recents.len(), MAX_RECENTS);
}

#[test]
fn serializes_as_plain_array() {
    let recents = RecentBoards::from_boards([board(5, "E")]);
    let value = serde_json::to_value(&recents).unwrap();
    assert_eq!(value, serde_json::json!([{ "id": 5, "title": "E" }]));
}

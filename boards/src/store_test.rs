use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::board::Board;

#[test]
fn load_missing_key_is_none() {
    let store = MemoryStore::new();
    let loaded: Option<Vec<Board>> = block_on(load(&store, "recentBoards")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn save_then_load_typed_value() {
    let store = MemoryStore::new();
    block_on(save(&store, "recentBoards", &vec![Board::new(1, "A")])).unwrap();
    let loaded: Vec<Board> = block_on(load(&store, "recentBoards")).unwrap().unwrap();
    assert_eq!(loaded, vec![Board::new(1, "A")]);
    assert_eq!(store.peek("recentBoards"), Some(json!([{ "id": 1, "title": "A" }])));
}

#[test]
fn load_wrong_shape_is_decode_error() {
    let store = MemoryStore::new();
    block_on(store.set("recentBoards", json!("not a list"))).unwrap();
    let err = block_on(load::<_, Vec<Board>>(&store, "recentBoards")).unwrap_err();
    assert!(matches!(err, StorageError::Decode(ref msg) if msg.starts_with("recentBoards")));
}

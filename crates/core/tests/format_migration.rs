//! Integration tests for the local store's multi-stage load fallback and
//! the workspace save/load round trip.

use std::fs;

use kanban_core::model::{Board, Card, Column, Workspace};
use kanban_core::store::{LocalStore, LEGACY_BOARD_FILE, WORKSPACE_FILE};

fn store_in(dir: &std::path::Path) -> LocalStore {
    LocalStore::new(dir).expect("data dir should be creatable")
}

#[test]
fn empty_directory_synthesizes_default_workspace() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let ws = store.load("user-1");
    assert_eq!(ws.user_id, "user-1");
    assert_eq!(ws.boards.len(), 1);
    assert_eq!(ws.boards[0].name, "My Board");
    assert_eq!(ws.current_board_id, Some(ws.boards[0].id));
}

#[test]
fn save_then_load_round_trips_field_for_field() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let mut ws = Workspace::with_default_board("user-1");
    let mut card = Card::new(
        uuid::Uuid::new_v4(),
        "Draft roadmap",
        "Outline Q2 initiatives.",
        vec!["a_0.jpg".into()],
    );
    card.add_history_entry("Card created in To Do");
    ws.boards[0].columns[0].cards.push(card);

    store.save(&ws).unwrap();
    let loaded = store.load("user-1");

    assert_eq!(ws, loaded);
}

#[test]
fn legacy_single_board_document_is_promoted() {
    let tmp = tempfile::tempdir().unwrap();

    // A pre-multi-board document: a bare Board without id/name/ownerId,
    // carrying a card with the legacy single photo field.
    let legacy = serde_json::json!({
        "columns": [{
            "id": uuid::Uuid::new_v4(),
            "title": "To Do",
            "cards": [{
                "id": uuid::Uuid::new_v4(),
                "title": "Old card",
                "description": "from the old app",
                "photoFileName": "legacy_0.jpg",
                "createdAt": "2023-01-01T00:00:00Z",
                "updatedAt": "2023-01-02T00:00:00Z"
            }],
            "createdAt": "2023-01-01T00:00:00Z"
        }],
        "completedCards": [],
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-01-02T00:00:00Z"
    });
    fs::write(
        tmp.path().join(LEGACY_BOARD_FILE),
        serde_json::to_vec(&legacy).unwrap(),
    )
    .unwrap();

    let store = store_in(tmp.path());
    let ws = store.load("device-7");

    assert_eq!(ws.boards.len(), 1);
    let board = &ws.boards[0];
    assert_eq!(board.name, "My Board");
    assert_eq!(board.owner_id, "device-7");
    assert_eq!(ws.current_board_id, Some(board.id));

    let card = &board.columns[0].cards[0];
    assert_eq!(card.photo_file_names, vec!["legacy_0.jpg".to_string()]);
    assert!(card.history.is_empty());
}

#[test]
fn primary_document_wins_over_legacy() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let ws = Workspace::with_default_board("user-1");
    store.save(&ws).unwrap();

    let legacy = Board::default_board("someone-else");
    fs::write(
        tmp.path().join(LEGACY_BOARD_FILE),
        serde_json::to_vec(&legacy).unwrap(),
    )
    .unwrap();

    let loaded = store.load("user-1");
    assert_eq!(loaded, ws);
}

#[test]
fn corrupt_primary_falls_back_to_legacy_then_default() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    fs::write(tmp.path().join(WORKSPACE_FILE), b"{not json").unwrap();
    fs::write(tmp.path().join(LEGACY_BOARD_FILE), b"also not json").unwrap();

    let ws = store.load("user-1");
    assert_eq!(ws.boards.len(), 1);
    assert_eq!(ws.boards[0].name, "My Board");
}

#[test]
fn dangling_current_pointer_is_repaired_on_load() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let mut ws = Workspace::with_default_board("user-1");
    ws.current_board_id = Some(uuid::Uuid::new_v4());
    store.save(&ws).unwrap();

    let loaded = store.load("user-1");
    assert_eq!(loaded.current_board_id, Some(loaded.boards[0].id));
}

#[test]
fn columns_survive_round_trip_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let mut ws = Workspace::with_default_board("user-1");
    ws.boards[0].columns.push(Column::new("Done-ish"));
    store.save(&ws).unwrap();

    let loaded = store.load("user-1");
    let titles: Vec<_> = loaded.boards[0]
        .columns
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles, ["To Do", "In Progress", "Done-ish"]);
}

//! Push cycle: send locally created entities to the server, parents first.
//!
//! The server assigns fresh ids on create, so each batch response is
//! zipped with the request (the server returns created records in
//! request order) to learn the server id for every pushed entity.
//! Boards and columns need theirs to address children on later pushes;
//! cards need theirs so the pull side can recognize them as already
//! local instead of merging them back as duplicates. There is no dedup
//! key in the protocol, so a crash between a successful batch and the
//! state save re-pushes that batch as duplicate rows on the next cycle.

use chrono::Utc;

use kanban_core::model::Workspace;
use kanban_core::types::EntityId;

use crate::api::{ApiClient, NewBoard, NewCard, NewColumn, SyncError};
use crate::state::SyncState;

/// Counts of what one push cycle sent.
#[derive(Debug, Default, PartialEq)]
pub struct PushReport {
    pub boards: usize,
    pub columns: usize,
    pub cards: usize,
}

/// Boards the server has never seen, paired with their local ids.
pub fn plan_boards(workspace: &Workspace, state: &SyncState) -> Vec<(EntityId, NewBoard)> {
    workspace
        .boards
        .iter()
        .filter(|board| !state.server_ids.contains_key(&board.id))
        .map(|board| {
            (
                board.id,
                NewBoard {
                    title: board.name.clone(),
                },
            )
        })
        .collect()
}

/// Unpushed columns whose parent board already has a server id.
pub fn plan_columns(workspace: &Workspace, state: &SyncState) -> Vec<(EntityId, NewColumn)> {
    let mut plan = Vec::new();
    for board in &workspace.boards {
        let Some(&server_board) = state.server_ids.get(&board.id) else {
            continue;
        };
        for (position, column) in board.columns.iter().enumerate() {
            if state.server_ids.contains_key(&column.id) {
                continue;
            }
            plan.push((
                column.id,
                NewColumn {
                    board_id: server_board,
                    title: column.title.clone(),
                    position: position as i32,
                },
            ));
        }
    }
    plan
}

/// Unpushed cards in columns the server knows, paired with their local
/// ids. A card is unpushed when it has no server id yet and was created
/// after the watermark.
pub fn plan_cards(workspace: &Workspace, state: &SyncState) -> Vec<(EntityId, NewCard)> {
    let mut plan = Vec::new();
    for board in &workspace.boards {
        for column in &board.columns {
            let Some(&server_column) = state.server_ids.get(&column.id) else {
                continue;
            };
            for (position, card) in column.cards.iter().enumerate() {
                if state.server_ids.contains_key(&card.id) {
                    continue;
                }
                let is_new = state
                    .last_pushed_at
                    .is_none_or(|watermark| card.created_at > watermark);
                if !is_new {
                    continue;
                }
                plan.push((
                    card.id,
                    NewCard {
                        column_id: server_column,
                        title: card.title.clone(),
                        description: if card.description.is_empty() {
                            None
                        } else {
                            Some(card.description.clone())
                        },
                        position: position as i32,
                    },
                ));
            }
        }
    }
    plan
}

/// Run one push cycle: boards, then columns, then cards, advancing the
/// watermark afterwards.
pub async fn run(
    client: &ApiClient,
    workspace: &Workspace,
    state: &mut SyncState,
) -> Result<PushReport, SyncError> {
    let mut report = PushReport::default();

    let board_plan = plan_boards(workspace, state);
    if !board_plan.is_empty() {
        let inputs: Vec<NewBoard> = board_plan.iter().map(|(_, b)| b.clone()).collect();
        let created = client.push_boards(&inputs).await?;
        for ((local_id, _), remote) in board_plan.iter().zip(&created) {
            state.server_ids.insert(*local_id, remote.id);
        }
        report.boards = created.len();
    }

    let column_plan = plan_columns(workspace, state);
    if !column_plan.is_empty() {
        let inputs: Vec<NewColumn> = column_plan.iter().map(|(_, c)| c.clone()).collect();
        let created = client.push_columns(&inputs).await?;
        for ((local_id, _), remote) in column_plan.iter().zip(&created) {
            state.server_ids.insert(*local_id, remote.id);
        }
        report.columns = created.len();
    }

    let card_plan = plan_cards(workspace, state);
    if !card_plan.is_empty() {
        let inputs: Vec<NewCard> = card_plan.iter().map(|(_, c)| c.clone()).collect();
        let created = client.push_cards(&inputs).await?;
        for ((local_id, _), remote) in card_plan.iter().zip(&created) {
            state.server_ids.insert(*local_id, remote.id);
        }
        report.cards = created.len();
    }

    state.last_pushed_at = Some(Utc::now());

    tracing::info!(
        boards = report.boards,
        columns = report.columns,
        cards = report.cards,
        "Push cycle complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kanban_core::model::Card;
    use uuid::Uuid;

    fn workspace() -> Workspace {
        Workspace::with_default_board("alice")
    }

    #[test]
    fn unpushed_board_is_planned_once() {
        let ws = workspace();
        let mut state = SyncState::default();

        let plan = plan_boards(&ws, &state);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].1.title, "My Board");

        state.server_ids.insert(ws.boards[0].id, Uuid::new_v4());
        assert!(plan_boards(&ws, &state).is_empty());
    }

    #[test]
    fn columns_wait_for_their_board_mapping() {
        let ws = workspace();
        let mut state = SyncState::default();

        assert!(plan_columns(&ws, &state).is_empty());

        let server_board = Uuid::new_v4();
        state.server_ids.insert(ws.boards[0].id, server_board);
        let plan = plan_columns(&ws, &state);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].1.title, "To Do");
        assert_eq!(plan[0].1.position, 0);
        assert_eq!(plan[1].1.position, 1);
        assert!(plan.iter().all(|(_, c)| c.board_id == server_board));
    }

    #[test]
    fn cards_are_filtered_by_watermark() {
        let mut ws = workspace();
        let column_id = ws.boards[0].columns[0].id;
        let mut old_card = Card::new(Uuid::new_v4(), "Old", "", Vec::new());
        old_card.created_at = Utc::now() - Duration::hours(2);
        ws.boards[0].columns[0].cards.push(old_card);
        ws.boards[0].columns[0]
            .cards
            .push(Card::new(Uuid::new_v4(), "Fresh", "note", Vec::new()));

        let mut state = SyncState::default();
        state.server_ids.insert(column_id, Uuid::new_v4());
        state.last_pushed_at = Some(Utc::now() - Duration::hours(1));

        let plan = plan_cards(&ws, &state);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].1.title, "Fresh");
        assert_eq!(plan[0].1.description.as_deref(), Some("note"));
        assert_eq!(plan[0].1.position, 1);
    }

    #[test]
    fn no_watermark_means_everything_in_known_columns() {
        let mut ws = workspace();
        let column_id = ws.boards[0].columns[0].id;
        let card = Card::new(Uuid::new_v4(), "Any", "", Vec::new());
        let card_id = card.id;
        ws.boards[0].columns[0].cards.push(card);

        let mut state = SyncState::default();
        state.server_ids.insert(column_id, Uuid::new_v4());

        let plan = plan_cards(&ws, &state);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].0, card_id);
        assert_eq!(plan[0].1.description, None);
    }

    #[test]
    fn cards_with_a_server_id_are_never_replanned() {
        let mut ws = workspace();
        let column_id = ws.boards[0].columns[0].id;
        let card = Card::new(Uuid::new_v4(), "Sent", "", Vec::new());
        let card_id = card.id;
        ws.boards[0].columns[0].cards.push(card);

        let mut state = SyncState::default();
        state.server_ids.insert(column_id, Uuid::new_v4());
        state.server_ids.insert(card_id, Uuid::new_v4());

        assert!(plan_cards(&ws, &state).is_empty());
    }
}

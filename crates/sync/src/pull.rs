//! Pull cycle: fetch records created after the cursor and merge them in.
//!
//! The cursor is the maximum `createdAt` observed, a watermark rather
//! than a per-item acknowledgment, so boundary records can be fetched
//! again; `merge` absorbs that by id. Records this device pushed itself
//! come back on pull under their server ids and are skipped via the
//! state's id map.

use std::collections::HashSet;

use kanban_core::model::Workspace;
use kanban_core::types::EntityId;

use crate::api::{ApiClient, SyncError};
use crate::merge;
use crate::state::SyncState;

/// Counts of what one pull cycle merged.
#[derive(Debug, Default, PartialEq)]
pub struct PullReport {
    pub boards: usize,
    pub columns: usize,
    pub cards: usize,
}

/// Server-side ids of entities this device already holds: everything it
/// pushed (boards, columns, and cards, recorded from the batch replies)
/// plus everything it pulled (identity-mapped on merge).
fn known_server_ids(state: &SyncState) -> HashSet<EntityId> {
    state.server_ids.values().copied().collect()
}

/// Run one pull cycle, merging boards first so columns and cards can
/// find their parents.
///
/// The cursor advances over every record seen, including ones whose
/// merge was skipped; a record rejected for a missing parent this cycle
/// is not re-fetched later. Safe only because parents always sort into
/// the same or an earlier cycle than their children.
pub async fn run(
    client: &ApiClient,
    workspace: &mut Workspace,
    state: &mut SyncState,
) -> Result<PullReport, SyncError> {
    let own = known_server_ids(state);
    let since = state.cursor;
    let mut report = PullReport::default();

    for board in client.pull_boards(since).await? {
        state.observe_pulled(board.created_at);
        if own.contains(&board.id) {
            continue;
        }
        if merge::merge_board(workspace, &board) {
            // A pulled board's local id IS its server id.
            state.server_ids.insert(board.id, board.id);
            report.boards += 1;
        }
    }

    for column in client.pull_columns(since).await? {
        state.observe_pulled(column.created_at);
        if own.contains(&column.id) {
            continue;
        }
        if merge::merge_column(workspace, &column) {
            state.server_ids.insert(column.id, column.id);
            report.columns += 1;
        }
    }

    for card in client.pull_cards(since).await? {
        state.observe_pulled(card.created_at);
        if own.contains(&card.id) {
            continue;
        }
        if merge::merge_card(workspace, &card) {
            report.cards += 1;
        }
    }

    workspace.repair_current_board();

    tracing::info!(
        boards = report.boards,
        columns = report.columns,
        cards = report.cards,
        cursor = ?state.cursor,
        "Pull cycle complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kanban_core::model::Card;
    use uuid::Uuid;

    use crate::api::RemoteCard;
    use crate::push;

    /// A card this device pushed must not come back as a local duplicate.
    /// Setup mirrors the steady state after one sync: the column was
    /// pulled earlier (local id == server id, identity-mapped), the card
    /// was pushed from here and the server assigned it a fresh id.
    #[test]
    fn own_pushed_card_is_not_merged_back() {
        let mut ws = Workspace::with_default_board("alice");
        let column_id = ws.boards[0].columns[0].id;

        let mut state = SyncState::default();
        state.server_ids.insert(column_id, column_id);

        let local_card = Card::new(Uuid::new_v4(), "Mine", "", Vec::new());
        let local_id = local_card.id;
        ws.boards[0].columns[0].cards.push(local_card);

        let server_card_id = Uuid::new_v4();
        state.server_ids.insert(local_id, server_card_id);

        // What the next pull returns for this card.
        let remote = RemoteCard {
            id: server_card_id,
            column_id,
            title: "Mine".into(),
            description: None,
            position: 0,
            created_at: Utc::now(),
        };

        let own = known_server_ids(&state);
        let merged = !own.contains(&remote.id) && crate::merge::merge_card(&mut ws, &remote);

        assert!(!merged);
        assert_eq!(ws.boards[0].columns[0].cards.len(), 1);
        assert_eq!(ws.boards[0].columns[0].cards[0].id, local_id);
    }

    /// End-to-end over the bookkeeping: the id the push cycle records is
    /// exactly the id the pull filter consults.
    #[test]
    fn push_recording_feeds_the_pull_filter() {
        let mut ws = Workspace::with_default_board("alice");
        let column_id = ws.boards[0].columns[0].id;
        let card = Card::new(Uuid::new_v4(), "Sent", "", Vec::new());
        let card_id = card.id;
        ws.boards[0].columns[0].cards.push(card);

        let mut state = SyncState::default();
        state.server_ids.insert(column_id, column_id);

        let plan = push::plan_cards(&ws, &state);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].0, card_id);

        // The zip step in push::run records this mapping.
        let server_card_id = Uuid::new_v4();
        state.server_ids.insert(plan[0].0, server_card_id);

        assert!(known_server_ids(&state).contains(&server_card_id));
    }
}

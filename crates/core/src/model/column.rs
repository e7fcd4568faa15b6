use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Card;
use crate::types::{EntityId, Timestamp};

/// An ordered, named bucket of active cards within a board.
///
/// `cards` order is the on-screen/storage order and is significant; a card
/// belongs to exactly one column at a time (or to the board's completed
/// bucket, never both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: EntityId,
    pub title: String,
    pub cards: Vec<Card>,
    pub created_at: Timestamp,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            cards: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

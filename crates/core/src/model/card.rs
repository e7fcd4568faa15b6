use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{EntityId, Timestamp};

/// One immutable line of a card's audit history.
///
/// Entries are append-only: they are never mutated or reordered in storage.
/// Consumers may re-sort for display but must not rewrite timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHistoryEntry {
    pub id: EntityId,
    pub description: String,
    pub timestamp: Timestamp,
}

impl CardHistoryEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A work item: title, description, attachment references, and audit trail.
///
/// `photo_file_names` holds opaque attachment references only; the bytes
/// behind them are the responsibility of an
/// [`AttachmentStore`](crate::attachments::AttachmentStore).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub photo_file_names: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub history: Vec<CardHistoryEntry>,
}

impl Card {
    pub fn new(
        id: EntityId,
        title: impl Into<String>,
        description: impl Into<String>,
        photo_file_names: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: description.into(),
            photo_file_names,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// Append a timestamped audit entry. The log itself is never rewritten.
    pub fn add_history_entry(&mut self, description: impl Into<String>) {
        self.history.push(CardHistoryEntry::new(description));
    }
}

/// Decode-side representation tolerating two legacy layouts: a single
/// `photoFileName` attachment reference (promoted to a one-element list)
/// and a missing `history` log (defaulted to empty).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRepr {
    id: EntityId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    photo_file_names: Option<Vec<String>>,
    #[serde(default)]
    photo_file_name: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default)]
    history: Vec<CardHistoryEntry>,
}

impl From<CardRepr> for Card {
    fn from(repr: CardRepr) -> Self {
        let photo_file_names = match (repr.photo_file_names, repr.photo_file_name) {
            (Some(names), _) => names,
            (None, Some(name)) => vec![name],
            (None, None) => Vec::new(),
        };
        Self {
            id: repr.id,
            title: repr.title,
            description: repr.description,
            photo_file_names,
            created_at: repr.created_at,
            updated_at: repr.updated_at,
            history: repr.history,
        }
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CardRepr::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut card = Card::new(Uuid::new_v4(), "Draft roadmap", "Outline Q2.", vec![]);
        card.add_history_entry("Card created in To Do");

        let json = serde_json::to_string(&card).unwrap();
        let decoded: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, decoded);
    }

    #[test]
    fn promotes_legacy_single_photo_field() {
        let json = r#"{
            "id": "6f8fcfbd-7cbe-4e2d-b6af-2a8b8c9de9f1",
            "title": "Old card",
            "description": "",
            "photoFileName": "abc_0.jpg",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.photo_file_names, vec!["abc_0.jpg".to_string()]);
        assert!(card.history.is_empty());
    }

    #[test]
    fn missing_photo_fields_default_to_empty_list() {
        let json = r#"{
            "id": "6f8fcfbd-7cbe-4e2d-b6af-2a8b8c9de9f1",
            "title": "Bare card",
            "description": "x",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.photo_file_names.is_empty());
    }

    #[test]
    fn new_card_timestamps_are_consistent() {
        let card = Card::new(Uuid::new_v4(), "t", "", vec![]);
        assert!(card.updated_at >= card.created_at);
    }
}

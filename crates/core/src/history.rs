//! Derives human-readable audit entries from card state changes.
//!
//! The engine appends at most one entry per mutation; an update touching
//! several fields produces a single combined label.

use crate::model::Card;

/// History text for card completion.
pub const MARKED_AS_DONE: &str = "Marked as done";

/// History text for card creation in a named column.
pub fn created_in(column_title: &str) -> String {
    format!("Card created in {column_title}")
}

/// History text for a cross-column move. Only emitted when the column
/// titles differ; same-title moves are silent.
pub fn moved(from_title: &str, to_title: &str) -> String {
    format!("Moved from {from_title} to {to_title}")
}

/// Diff two card versions across the audited fields and return a single
/// combined label, or `None` when nothing observable changed.
///
/// Audited fields: title, description, and attachment count (direction of
/// the count delta picks "Photos added" vs "Photos removed").
pub fn describe_update(old: &Card, new: &Card) -> Option<String> {
    let mut changes: Vec<&str> = Vec::new();

    if old.title != new.title {
        changes.push("Title changed");
    }
    if old.description != new.description {
        changes.push("Description changed");
    }
    if old.photo_file_names.len() != new.photo_file_names.len() {
        if new.photo_file_names.len() > old.photo_file_names.len() {
            changes.push("Photos added");
        } else {
            changes.push("Photos removed");
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn card(title: &str, description: &str, photos: usize) -> Card {
        let names = (0..photos).map(|i| format!("p_{i}.jpg")).collect();
        Card::new(Uuid::nil(), title, description, names)
    }

    #[test]
    fn no_change_yields_none() {
        let a = card("t", "d", 1);
        assert_eq!(describe_update(&a, &a.clone()), None);
    }

    #[test]
    fn single_field_change() {
        let old = card("t", "d", 0);
        let new = card("t2", "d", 0);
        assert_eq!(describe_update(&old, &new).as_deref(), Some("Title changed"));
    }

    #[test]
    fn multiple_changes_join_with_comma() {
        let old = card("t", "d", 0);
        let new = card("t2", "d2", 2);
        assert_eq!(
            describe_update(&old, &new).as_deref(),
            Some("Title changed, Description changed, Photos added"),
        );
    }

    #[test]
    fn photo_removal_is_labelled() {
        let old = card("t", "d", 3);
        let new = card("t", "d", 1);
        assert_eq!(describe_update(&old, &new).as_deref(), Some("Photos removed"));
    }
}

//! Value types for the kanban domain: workspace, boards, columns, cards,
//! shares, and the per-card audit history.
//!
//! All types serialize with camelCase field names; this is both the local
//! persisted document format and the shape the legacy decoders in
//! [`card`] / [`board`] migrate forward from.

mod board;
mod card;
mod column;
mod workspace;

pub use board::{AccessLevel, Board, BoardShare};
pub use card::{Card, CardHistoryEntry};
pub use column::Column;
pub use workspace::Workspace;

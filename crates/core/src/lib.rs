//! `kanban-core` -- client-side entity model and mutation engine.
//!
//! Owns the in-memory [`model::Workspace`] and every state transition over
//! it: card/board CRUD, cross-column moves, completion, sharing, and the
//! per-card audit history. Persistence and attachment storage are injected
//! capabilities ([`store::WorkspaceStore`], [`attachments::AttachmentStore`])
//! so the engine itself stays pure and testable.
//!
//! Synchronization with the remote store lives in `kanban-sync`; the HTTP
//! server lives in `kanban-api`.

pub mod attachments;
pub mod engine;
pub mod error;
pub mod history;
pub mod model;
pub mod store;
pub mod types;

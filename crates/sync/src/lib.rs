//! `kanban-sync` -- client-side sync agent.
//!
//! Pushes locally created boards, columns, and cards to the server in
//! batches, and pulls remote records created after a local watermark,
//! merging them into the workspace by id. The server assigns its own
//! ids on push, so the agent keeps a local-to-server id map in its
//! state file to address parents on later pushes and to recognize its
//! own records when pulling.

pub mod api;
pub mod config;
pub mod merge;
pub mod pull;
pub mod push;
pub mod state;

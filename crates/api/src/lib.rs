//! `kanban-api` -- the authoritative sync server.
//!
//! Exposes per-user-scoped CRUD over boards/columns/cards plus the two
//! sync primitives (bulk-create, since-filtered listing) as a JSON REST
//! surface. See `routes` for the route table and `error` for the
//! HTTP error taxonomy.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

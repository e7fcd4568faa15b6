pub mod meta;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the authenticated route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /boards                      list, create
/// /boards/{id}                 get
/// /boards/{id}/columns         columns in position order
/// /columns                     create
/// /columns/{id}                get
/// /columns/{id}/cards          cards in position order
/// /cards                       create
/// /cards/{id}                  get
///
/// /sync/boards                 bulk push (POST), since-filtered pull (GET)
/// /sync/columns                bulk push (POST), since-filtered pull (GET)
/// /sync/cards                  bulk push (POST), since-filtered pull (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/boards",
            get(handlers::boards::list_boards).post(handlers::boards::create_board),
        )
        .route("/boards/{id}", get(handlers::boards::get_board))
        .route(
            "/boards/{id}/columns",
            get(handlers::boards::list_board_columns),
        )
        .route("/columns", post(handlers::columns::create_column))
        .route("/columns/{id}", get(handlers::columns::get_column))
        .route(
            "/columns/{id}/cards",
            get(handlers::columns::list_column_cards),
        )
        .route("/cards", post(handlers::cards::create_card))
        .route("/cards/{id}", get(handlers::cards::get_card))
        .route(
            "/sync/boards",
            post(handlers::sync::push_boards).get(handlers::sync::pull_boards),
        )
        .route(
            "/sync/columns",
            post(handlers::sync::push_columns).get(handlers::sync::pull_columns),
        )
        .route(
            "/sync/cards",
            post(handlers::sync::push_cards).get(handlers::sync::pull_cards),
        )
}

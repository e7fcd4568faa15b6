//! Handlers for the bulk sync surface: batch push and since-filtered pull.
//!
//! Push endpoints run the whole batch in one database transaction -- the
//! first failure rolls everything back, no partial commits. There is no
//! server-side deduplication: pushing the same logical items twice creates
//! duplicate rows with new ids (known protocol gap; pull-side consumers
//! must be idempotent on their own ids).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kanban_db::models::{BoardInput, CardInput, ColumnInput};
use kanban_db::repositories::{BoardRepo, CardRepo, ColumnRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{parse_since, SinceQuery};
use crate::response::ItemsResponse;
use crate::state::AppState;

/// Request body for every push endpoint.
#[derive(Debug, Deserialize)]
pub struct SyncItems<T> {
    pub items: Vec<T>,
}

/// POST /sync/boards
pub async fn push_boards(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SyncItems<BoardInput>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let items = BoardRepo::create_bulk(&state.pool, &user.user_id, &body.items).await?;

    tracing::info!(count = items.len(), user_id = %user.user_id, "Boards pushed");

    Ok((StatusCode::CREATED, Json(ItemsResponse { items })))
}

/// GET /sync/boards?since=...
pub async fn pull_boards(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SinceQuery>,
) -> AppResult<impl IntoResponse> {
    let since = parse_since(&query)?;
    let items = BoardRepo::list_since(&state.pool, &user.user_id, since).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /sync/columns
pub async fn push_columns(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SyncItems<ColumnInput>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let items = ColumnRepo::create_bulk(&state.pool, &user.user_id, &body.items).await?;

    tracing::info!(count = items.len(), user_id = %user.user_id, "Columns pushed");

    Ok((StatusCode::CREATED, Json(ItemsResponse { items })))
}

/// GET /sync/columns?since=...
pub async fn pull_columns(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SinceQuery>,
) -> AppResult<impl IntoResponse> {
    let since = parse_since(&query)?;
    let items = ColumnRepo::list_since(&state.pool, &user.user_id, since).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /sync/cards
pub async fn push_cards(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SyncItems<CardInput>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let items = CardRepo::create_bulk(&state.pool, &user.user_id, &body.items).await?;

    tracing::info!(count = items.len(), user_id = %user.user_id, "Cards pushed");

    Ok((StatusCode::CREATED, Json(ItemsResponse { items })))
}

/// GET /sync/cards?since=...
pub async fn pull_cards(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SinceQuery>,
) -> AppResult<impl IntoResponse> {
    let since = parse_since(&query)?;
    let items = CardRepo::list_since(&state.pool, &user.user_id, since).await?;
    Ok(Json(ItemsResponse { items }))
}

//! Handlers for board CRUD and the board-scoped column listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kanban_core::error::CoreError;
use kanban_core::types::EntityId;
use kanban_db::models::BoardInput;
use kanban_db::repositories::{BoardRepo, ColumnRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ItemsResponse;
use crate::state::AppState;

/// GET /boards
///
/// List the caller's boards, newest first.
pub async fn list_boards(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = BoardRepo::list(&state.pool, &user.user_id).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /boards
///
/// Create a single board. 400 when the body shape is wrong (e.g. `title`
/// is not a string).
pub async fn create_board(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<BoardInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let board = BoardRepo::create(&state.pool, &user.user_id, &input).await?;

    tracing::info!(board_id = %board.id, user_id = %user.user_id, "Board created");

    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /boards/{id}
///
/// Fetch one board. Missing and foreign boards both resolve as 404.
pub async fn get_board(
    user: AuthUser,
    State(state): State<AppState>,
    Path(board_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let board = BoardRepo::find_by_id(&state.pool, &user.user_id, board_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Board",
            id: board_id,
        }))?;

    Ok(Json(board))
}

/// GET /boards/{id}/columns
///
/// The board's columns in position order.
pub async fn list_board_columns(
    user: AuthUser,
    State(state): State<AppState>,
    Path(board_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let items = ColumnRepo::list_by_board(&state.pool, &user.user_id, board_id).await?;
    Ok(Json(ItemsResponse { items }))
}

//! Handlers for column CRUD and the column-scoped card listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kanban_core::error::CoreError;
use kanban_core::types::EntityId;
use kanban_db::models::ColumnInput;
use kanban_db::repositories::{CardRepo, ColumnRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ItemsResponse;
use crate::state::AppState;

/// POST /columns
///
/// Create a single column. `position` is caller-supplied and preserved
/// as-is; the server never renumbers.
pub async fn create_column(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ColumnInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let column = ColumnRepo::create(&state.pool, &user.user_id, &input).await?;

    tracing::info!(column_id = %column.id, board_id = %column.board_id, "Column created");

    Ok((StatusCode::CREATED, Json(column)))
}

/// GET /columns/{id}
pub async fn get_column(
    user: AuthUser,
    State(state): State<AppState>,
    Path(column_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let column = ColumnRepo::find_by_id(&state.pool, &user.user_id, column_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Column",
            id: column_id,
        }))?;

    Ok(Json(column))
}

/// GET /columns/{id}/cards
///
/// The column's cards in position order.
pub async fn list_column_cards(
    user: AuthUser,
    State(state): State<AppState>,
    Path(column_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let items = CardRepo::list_by_column(&state.pool, &user.user_id, column_id).await?;
    Ok(Json(ItemsResponse { items }))
}

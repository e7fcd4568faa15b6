//! Handlers for card CRUD.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kanban_core::error::CoreError;
use kanban_core::types::EntityId;
use kanban_db::models::CardInput;
use kanban_db::repositories::CardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /cards
///
/// Create a single card. `description` may be null.
pub async fn create_card(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CardInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let card = CardRepo::create(&state.pool, &user.user_id, &input).await?;

    tracing::info!(card_id = %card.id, column_id = %card.column_id, "Card created");

    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /cards/{id}
pub async fn get_card(
    user: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let card = CardRepo::find_by_id(&state.pool, &user.user_id, card_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        }))?;

    Ok(Json(card))
}

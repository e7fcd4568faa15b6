//! Authenticated-user extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kanban_core::error::CoreError;
use kanban_db::repositories::UserRepo;

use crate::auth::AuthMode;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a Bearer token in the `Authorization`
/// header (or the fixed dev identity when auth is disabled).
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The user row is upserted on every authenticated request, so entity
/// tables can always reference it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id (token `sub` claim, or the dev identity).
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = match state.auth.as_ref() {
            AuthMode::Disabled { dev_user_id } => dev_user_id.clone(),
            AuthMode::Enabled { verifier } => {
                let auth_header = parts
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Unauthorized(
                            "Missing Authorization header".into(),
                        ))
                    })?;

                let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?;

                verifier.verify(token).map_err(AppError::Core)?.sub
            }
        };

        UserRepo::ensure_user(&state.pool, &user_id).await?;

        Ok(AuthUser { user_id })
    }
}

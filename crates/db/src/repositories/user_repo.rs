//! Repository for the `users` table.

use sqlx::PgPool;

/// Provides the user upsert run on every authenticated request.
pub struct UserRepo;

impl UserRepo {
    /// Register a user id if it is not already present.
    pub async fn ensure_user(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

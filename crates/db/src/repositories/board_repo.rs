//! Repository for the `boards` table.

use sqlx::PgPool;

use kanban_core::types::{EntityId, Timestamp};

use crate::models::{BoardInput, BoardRecord};

/// Column list for `boards` queries.
const BOARD_COLUMNS: &str = "id, title, created_at";

/// Provides user-scoped CRUD and sync primitives for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert one board for the user.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &BoardInput,
    ) -> Result<BoardRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO boards (user_id, title) VALUES ($1, $2) RETURNING {BOARD_COLUMNS}"
        );
        sqlx::query_as::<_, BoardRecord>(&query)
            .bind(user_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of boards in a single transaction. The first failure
    /// rolls back the entire batch; no partial commits.
    pub async fn create_bulk(
        pool: &PgPool,
        user_id: &str,
        items: &[BoardInput],
    ) -> Result<Vec<BoardRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO boards (user_id, title) VALUES ($1, $2) RETURNING {BOARD_COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for input in items {
            let record = sqlx::query_as::<_, BoardRecord>(&query)
                .bind(user_id)
                .bind(&input.title)
                .fetch_one(&mut *tx)
                .await?;
            created.push(record);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Fetch one board within the user's scope. Foreign users' rows
    /// resolve as `None`, never as a permission error.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        board_id: EntityId,
    ) -> Result<Option<BoardRecord>, sqlx::Error> {
        let query = format!("SELECT {BOARD_COLUMNS} FROM boards WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, BoardRecord>(&query)
            .bind(user_id)
            .bind(board_id)
            .fetch_optional(pool)
            .await
    }

    /// All of the user's boards, newest first.
    pub async fn list(pool: &PgPool, user_id: &str) -> Result<Vec<BoardRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BoardRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Boards created strictly after `since`, newest first. `None` returns
    /// everything.
    pub async fn list_since(
        pool: &PgPool,
        user_id: &str,
        since: Option<Timestamp>,
    ) -> Result<Vec<BoardRecord>, sqlx::Error> {
        let Some(since) = since else {
            return Self::list(pool, user_id).await;
        };
        let query = format!(
            "SELECT {BOARD_COLUMNS} FROM boards \
             WHERE user_id = $1 AND created_at > $2 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BoardRecord>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}

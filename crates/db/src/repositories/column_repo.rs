//! Repository for the `columns` table.

use sqlx::PgPool;

use kanban_core::types::{EntityId, Timestamp};

use crate::models::{ColumnInput, ColumnRecord};

/// Column list for `columns` queries.
const COLUMN_COLUMNS: &str = "id, board_id, title, position, created_at";

/// Provides user-scoped CRUD and sync primitives for columns.
pub struct ColumnRepo;

impl ColumnRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &ColumnInput,
    ) -> Result<ColumnRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO columns (user_id, board_id, title, position) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMN_COLUMNS}"
        );
        sqlx::query_as::<_, ColumnRecord>(&query)
            .bind(user_id)
            .bind(input.board_id)
            .bind(&input.title)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of columns in a single all-or-nothing transaction.
    pub async fn create_bulk(
        pool: &PgPool,
        user_id: &str,
        items: &[ColumnInput],
    ) -> Result<Vec<ColumnRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO columns (user_id, board_id, title, position) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMN_COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for input in items {
            let record = sqlx::query_as::<_, ColumnRecord>(&query)
                .bind(user_id)
                .bind(input.board_id)
                .bind(&input.title)
                .bind(input.position)
                .fetch_one(&mut *tx)
                .await?;
            created.push(record);
        }
        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        column_id: EntityId,
    ) -> Result<Option<ColumnRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMN_COLUMNS} FROM columns WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, ColumnRecord>(&query)
            .bind(user_id)
            .bind(column_id)
            .fetch_optional(pool)
            .await
    }

    /// A board's columns in position order.
    pub async fn list_by_board(
        pool: &PgPool,
        user_id: &str,
        board_id: EntityId,
    ) -> Result<Vec<ColumnRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMN_COLUMNS} FROM columns \
             WHERE user_id = $1 AND board_id = $2 \
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, ColumnRecord>(&query)
            .bind(user_id)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Columns created strictly after `since`, newest first. `None`
    /// returns everything.
    pub async fn list_since(
        pool: &PgPool,
        user_id: &str,
        since: Option<Timestamp>,
    ) -> Result<Vec<ColumnRecord>, sqlx::Error> {
        let query = match since {
            Some(_) => format!(
                "SELECT {COLUMN_COLUMNS} FROM columns \
                 WHERE user_id = $1 AND created_at > $2 \
                 ORDER BY created_at DESC"
            ),
            None => format!(
                "SELECT {COLUMN_COLUMNS} FROM columns \
                 WHERE user_id = $1 \
                 ORDER BY created_at DESC"
            ),
        };
        let mut q = sqlx::query_as::<_, ColumnRecord>(&query).bind(user_id);
        if let Some(since) = since {
            q = q.bind(since);
        }
        q.fetch_all(pool).await
    }
}

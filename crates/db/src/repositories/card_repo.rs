//! Repository for the `cards` table.

use sqlx::PgPool;

use kanban_core::types::{EntityId, Timestamp};

use crate::models::{CardInput, CardRecord};

/// Column list for `cards` queries.
const CARD_COLUMNS: &str = "id, column_id, title, description, position, created_at";

/// Provides user-scoped CRUD and sync primitives for cards.
pub struct CardRepo;

impl CardRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CardInput,
    ) -> Result<CardRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (user_id, column_id, title, description, position) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CARD_COLUMNS}"
        );
        sqlx::query_as::<_, CardRecord>(&query)
            .bind(user_id)
            .bind(input.column_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of cards in a single all-or-nothing transaction.
    pub async fn create_bulk(
        pool: &PgPool,
        user_id: &str,
        items: &[CardInput],
    ) -> Result<Vec<CardRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (user_id, column_id, title, description, position) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CARD_COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for input in items {
            let record = sqlx::query_as::<_, CardRecord>(&query)
                .bind(user_id)
                .bind(input.column_id)
                .bind(&input.title)
                .bind(&input.description)
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
        card_id: EntityId,
    ) -> Result<Option<CardRecord>, sqlx::Error> {
        let query = format!("SELECT {CARD_COLUMNS} FROM cards WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, CardRecord>(&query)
            .bind(user_id)
            .bind(card_id)
            .fetch_optional(pool)
            .await
    }

    /// A column's cards in position order.
    pub async fn list_by_column(
        pool: &PgPool,
        user_id: &str,
        column_id: EntityId,
    ) -> Result<Vec<CardRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM cards \
             WHERE user_id = $1 AND column_id = $2 \
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, CardRecord>(&query)
            .bind(user_id)
            .bind(column_id)
            .fetch_all(pool)
            .await
    }

    /// Cards created strictly after `since`, newest first. `None` returns
    /// everything.
    pub async fn list_since(
        pool: &PgPool,
        user_id: &str,
        since: Option<Timestamp>,
    ) -> Result<Vec<CardRecord>, sqlx::Error> {
        let query = match since {
            Some(_) => format!(
                "SELECT {CARD_COLUMNS} FROM cards \
                 WHERE user_id = $1 AND created_at > $2 \
                 ORDER BY created_at DESC"
            ),
            None => format!(
                "SELECT {CARD_COLUMNS} FROM cards \
                 WHERE user_id = $1 \
                 ORDER BY created_at DESC"
            ),
        };
        let mut q = sqlx::query_as::<_, CardRecord>(&query).bind(user_id);
        if let Some(since) = since {
            q = q.bind(since);
        }
        q.fetch_all(pool).await
    }
}

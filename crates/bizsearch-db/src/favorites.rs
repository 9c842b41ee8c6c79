//! Database operations for the `favorites` table.
//!
//! The table is a key-value store keyed by `business_id`. Rows are listed in
//! the order they were first put; putting an existing key keeps the original
//! row and its position.

use bizsearch_core::{FavoriteRecord, FavoritesSet};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `favorites` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FavoriteRow {
    pub id: i64,
    pub business_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteRecord {
    fn from(row: FavoriteRow) -> Self {
        Self {
            business_id: row.business_id,
        }
    }
}

/// Returns every favorite in first-put order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_favorites(pool: &SqlitePool) -> Result<Vec<FavoriteRow>, DbError> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        "SELECT id, business_id, created_at FROM favorites ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Reads the whole table into a fresh [`FavoritesSet`].
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn load_favorites_set(pool: &SqlitePool) -> Result<FavoritesSet, DbError> {
    let records: Vec<FavoriteRecord> = list_favorites(pool)
        .await?
        .into_iter()
        .map(FavoriteRecord::from)
        .collect();
    Ok(FavoritesSet::load(&records))
}

/// Inserts `business_id` unless it is already present.
///
/// Returns `true` if a row was inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn put_favorite(pool: &SqlitePool, business_id: &str) -> Result<bool, DbError> {
    let result = sqlx::query(
        "INSERT INTO favorites (business_id, created_at) VALUES (?1, ?2) \
         ON CONFLICT (business_id) DO NOTHING",
    )
    .bind(business_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes `business_id`. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_favorite(pool: &SqlitePool, business_id: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM favorites WHERE business_id = ?1")
        .bind(business_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

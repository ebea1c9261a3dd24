//! Database operations for the `card_sets` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `card_sets` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardSetRow {
    pub id: String,
    pub name: String,
    pub marketplace_group_id: Option<i64>,
    pub marketplace_url: Option<String>,
    pub price_tracker_set_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const SET_COLUMNS: &str = "id, name, marketplace_group_id, marketplace_url, price_tracker_set_id, \
                           created_at, updated_at";

/// Returns one set by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_set(pool: &PgPool, set_id: &str) -> Result<Option<CardSetRow>, DbError> {
    let row = sqlx::query_as::<_, CardSetRow>(&format!(
        "SELECT {SET_COLUMNS} FROM card_sets WHERE id = $1"
    ))
    .bind(set_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Every set id in the catalog.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_set_ids(pool: &PgPool) -> Result<Vec<String>, DbError> {
    let ids = sqlx::query_scalar::<_, String>("SELECT id FROM card_sets ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Sets linked to a marketplace group, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sets_with_group(pool: &PgPool) -> Result<Vec<CardSetRow>, DbError> {
    let rows = sqlx::query_as::<_, CardSetRow>(&format!(
        "SELECT {SET_COLUMNS} FROM card_sets \
         WHERE marketplace_group_id IS NOT NULL \
         ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sets known to the price tracker, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sets_with_price_tracker_id(pool: &PgPool) -> Result<Vec<CardSetRow>, DbError> {
    let rows = sqlx::query_as::<_, CardSetRow>(&format!(
        "SELECT {SET_COLUMNS} FROM card_sets \
         WHERE price_tracker_set_id IS NOT NULL \
         ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Links a set to its marketplace group and price-guide URL.
///
/// Returns `false` when no set with that id exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn update_set_marketplace_group(
    pool: &PgPool,
    set_id: &str,
    group_id: i64,
    url: &str,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE card_sets \
         SET marketplace_group_id = $1, marketplace_url = $2, updated_at = NOW() \
         WHERE id = $3",
    )
    .bind(group_id)
    .bind(url)
    .bind(set_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

//! Database operations for the `cards` table.
//!
//! `marketplace_products` holds the card's variant-entry list as JSONB.
//! Writers replace the whole list; callers merge before writing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use cardsync_core::{CardVariantEntry, PrintingFlags};

use crate::DbError;

/// A row from the `cards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardRow {
    pub id: String,
    pub set_id: String,
    pub local_id: Option<String>,
    pub name: String,
    pub rarity: Option<String>,
    pub variant_normal: bool,
    pub variant_reverse: bool,
    pub variant_holo: bool,
    pub variant_first_edition: bool,
    pub variant_poke_ball: bool,
    pub variant_master_ball: bool,
    pub marketplace_product_id: Option<i64>,
    pub marketplace_image_url: Option<String>,
    pub marketplace_products: Json<Vec<CardVariantEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardRow {
    #[must_use]
    pub fn printing_flags(&self) -> PrintingFlags {
        PrintingFlags {
            normal: self.variant_normal,
            reverse: self.variant_reverse,
            holo: self.variant_holo,
            first_edition: self.variant_first_edition,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[CardVariantEntry] {
        &self.marketplace_products.0
    }
}

/// Replacement marketplace fields for an existing card.
#[derive(Debug, Clone)]
pub struct CardProductsUpdate<'a> {
    pub card_id: &'a str,
    pub entries: &'a [CardVariantEntry],
    pub primary_product_id: Option<i64>,
    pub primary_image_url: Option<&'a str>,
    pub has_poke_ball: bool,
    pub has_master_ball: bool,
}

/// A card created directly from a marketplace product.
#[derive(Debug, Clone)]
pub struct NewCard<'a> {
    pub id: &'a str,
    pub set_id: &'a str,
    pub local_id: Option<&'a str>,
    pub name: &'a str,
    pub rarity: Option<&'a str>,
    pub printing: PrintingFlags,
    pub has_poke_ball: bool,
    pub has_master_ball: bool,
    pub primary_product_id: i64,
    pub primary_image_url: &'a str,
    pub entries: &'a [CardVariantEntry],
}

/// Returns `true` if a card with this id exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn card_exists(pool: &PgPool, card_id: &str) -> Result<bool, DbError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cards WHERE id = $1)")
            .bind(card_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// The subset of `card_ids` present in the catalog, in no particular order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn existing_card_ids(pool: &PgPool, card_ids: &[String]) -> Result<Vec<String>, DbError> {
    if card_ids.is_empty() {
        return Ok(Vec::new());
    }
    let ids = sqlx::query_scalar::<_, String>("SELECT id FROM cards WHERE id = ANY($1)")
        .bind(card_ids)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Returns one card by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails or the stored entry list
/// cannot be decoded.
pub async fn get_card(pool: &PgPool, card_id: &str) -> Result<Option<CardRow>, DbError> {
    let row = sqlx::query_as::<_, CardRow>(
        "SELECT id, set_id, local_id, name, rarity, variant_normal, variant_reverse, \
                variant_holo, variant_first_edition, variant_poke_ball, variant_master_ball, \
                marketplace_product_id, marketplace_image_url, marketplace_products, \
                created_at, updated_at \
         FROM cards \
         WHERE id = $1",
    )
    .bind(card_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Writes a card's merged entry list together with the derived headline
/// product and ball-pattern flags.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the card does not exist, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_card_products(
    pool: &PgPool,
    update: &CardProductsUpdate<'_>,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE cards \
         SET marketplace_products = $1, \
             marketplace_product_id = $2, \
             marketplace_image_url = $3, \
             variant_poke_ball = $4, \
             variant_master_ball = $5, \
             updated_at = NOW() \
         WHERE id = $6",
    )
    .bind(Json(update.entries))
    .bind(update.primary_product_id)
    .bind(update.primary_image_url)
    .bind(update.has_poke_ball)
    .bind(update.has_master_ball)
    .bind(update.card_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("card {}", update.card_id)));
    }
    Ok(())
}

/// Inserts a new card. Returns `false` if a card with the same id already
/// exists (the existing row is left untouched).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, e.g. when the set does
/// not exist.
pub async fn insert_card(pool: &PgPool, card: &NewCard<'_>) -> Result<bool, DbError> {
    let inserted = sqlx::query_scalar::<_, String>(
        "INSERT INTO cards ( \
             id, set_id, local_id, name, rarity, \
             variant_normal, variant_reverse, variant_holo, variant_first_edition, \
             variant_poke_ball, variant_master_ball, \
             marketplace_product_id, marketplace_image_url, marketplace_products \
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         ON CONFLICT (id) DO NOTHING \
         RETURNING id",
    )
    .bind(card.id)
    .bind(card.set_id)
    .bind(card.local_id)
    .bind(card.name)
    .bind(card.rarity)
    .bind(card.printing.normal)
    .bind(card.printing.reverse)
    .bind(card.printing.holo)
    .bind(card.printing.first_edition)
    .bind(card.has_poke_ball)
    .bind(card.has_master_ball)
    .bind(card.primary_product_id)
    .bind(card.primary_image_url)
    .bind(Json(card.entries))
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Headline marketplace product id → card id, for one set.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn cards_by_product_id(
    pool: &PgPool,
    set_id: &str,
) -> Result<HashMap<i64, String>, DbError> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT marketplace_product_id, id \
         FROM cards \
         WHERE set_id = $1 AND marketplace_product_id IS NOT NULL",
    )
    .bind(set_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use cardsync_core::VariantType;

    use super::*;

    fn row(entries: Vec<CardVariantEntry>) -> CardRow {
        CardRow {
            id: "sv10-023".to_string(),
            set_id: "sv10".to_string(),
            local_id: Some("023".to_string()),
            name: "Pikachu".to_string(),
            rarity: Some("Common".to_string()),
            variant_normal: true,
            variant_reverse: true,
            variant_holo: false,
            variant_first_edition: false,
            variant_poke_ball: false,
            variant_master_ball: false,
            marketplace_product_id: None,
            marketplace_image_url: None,
            marketplace_products: Json(entries),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn printing_flags_map_variant_columns() {
        let flags = row(vec![]).printing_flags();
        assert!(flags.normal);
        assert!(flags.reverse);
        assert!(!flags.holo);
        assert!(!flags.first_edition);
    }

    #[test]
    fn entries_expose_json_column() {
        let entry = CardVariantEntry {
            product_id: 5,
            pattern_types: vec![VariantType::Normal],
            name: "Pikachu".to_string(),
            image_url: String::new(),
            is_primary: true,
        };
        let card = row(vec![entry.clone()]);
        assert_eq!(card.entries(), &[entry]);
    }

    #[test]
    fn stored_entry_json_uses_variant_types_key() {
        let stored = serde_json::json!([
            {"product_id": 1, "variant_types": ["poke_ball"], "name": "A", "image_url": "", "is_primary": false}
        ]);
        let entries: Vec<CardVariantEntry> =
            serde_json::from_value(stored).expect("valid stored entries");
        assert_eq!(entries[0].pattern_types, vec![VariantType::PokeBall]);
    }
}

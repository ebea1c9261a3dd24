//! The catalog operations the sync commands need, behind a trait so the
//! orchestration can run against Postgres or an in-memory double.

use std::collections::HashMap;

use cardsync_core::{CardVariantEntry, CatalogKey};
use cardsync_db::{CardPriceUpsert, CardProductsUpdate, DbError, NewCard};

pub(crate) trait CatalogStore {
    async fn card_exists(&self, card_id: &str) -> Result<bool, DbError>;

    /// The first key, in the given order, that names an existing card.
    async fn first_existing_card(&self, keys: &[CatalogKey]) -> Result<Option<String>, DbError>;

    /// The card's variant entries, or `None` when the card does not exist.
    async fn card_entries(&self, card_id: &str)
        -> Result<Option<Vec<CardVariantEntry>>, DbError>;

    async fn write_card_products(&self, update: &CardProductsUpdate<'_>) -> Result<(), DbError>;

    /// Returns `false` if the card already existed.
    async fn insert_card(&self, card: &NewCard<'_>) -> Result<bool, DbError>;

    async fn cards_by_product_id(&self, set_id: &str) -> Result<HashMap<i64, String>, DbError>;

    async fn upsert_card_price(&self, price: &CardPriceUpsert) -> Result<(), DbError>;
}

pub(crate) struct PgStore<'a> {
    pool: &'a sqlx::PgPool,
}

impl<'a> PgStore<'a> {
    pub(crate) fn new(pool: &'a sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgStore<'_> {
    async fn card_exists(&self, card_id: &str) -> Result<bool, DbError> {
        cardsync_db::card_exists(self.pool, card_id).await
    }

    async fn first_existing_card(&self, keys: &[CatalogKey]) -> Result<Option<String>, DbError> {
        let ids: Vec<String> = keys.iter().map(CatalogKey::card_id).collect();
        let found = cardsync_db::existing_card_ids(self.pool, &ids).await?;
        Ok(ids.into_iter().find(|id| found.contains(id)))
    }

    async fn card_entries(
        &self,
        card_id: &str,
    ) -> Result<Option<Vec<CardVariantEntry>>, DbError> {
        let card = cardsync_db::get_card(self.pool, card_id).await?;
        Ok(card.map(|c| c.marketplace_products.0))
    }

    async fn write_card_products(&self, update: &CardProductsUpdate<'_>) -> Result<(), DbError> {
        cardsync_db::update_card_products(self.pool, update).await
    }

    async fn insert_card(&self, card: &NewCard<'_>) -> Result<bool, DbError> {
        cardsync_db::insert_card(self.pool, card).await
    }

    async fn cards_by_product_id(&self, set_id: &str) -> Result<HashMap<i64, String>, DbError> {
        cardsync_db::cards_by_product_id(self.pool, set_id).await
    }

    async fn upsert_card_price(&self, price: &CardPriceUpsert) -> Result<(), DbError> {
        cardsync_db::upsert_card_price(self.pool, price).await
    }
}

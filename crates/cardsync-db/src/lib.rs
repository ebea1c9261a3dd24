//! Postgres persistence for card sets, cards and card prices.

use thiserror::Error;

pub mod cards;
pub mod pool;
pub mod prices;
pub mod sets;

pub use cards::{
    card_exists, cards_by_product_id, existing_card_ids, get_card, insert_card, update_card_products,
    CardProductsUpdate, CardRow, NewCard,
};
pub use pool::{connect_pool, connect_pool_from_config, ping, run_migrations, PoolConfig};
pub use prices::{upsert_card_price, CardPriceUpsert};
pub use sets::{
    get_set, list_set_ids, list_sets_with_group, list_sets_with_price_tracker_id,
    update_set_marketplace_group, CardSetRow,
};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

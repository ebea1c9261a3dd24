//! Database operations for the `card_prices` table.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// One card's price snapshot and grading assessment.
///
/// `safety_tier` must be one of `SAFE_BET`, `GAMBLE` or `DO_NOT_GRADE`; the
/// table rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPriceUpsert {
    pub card_id: String,
    pub marketplace_product_id: Option<i64>,
    pub market_price: Option<Decimal>,
    pub market_price_condition: Option<String>,
    pub psa9_price: Option<Decimal>,
    pub psa10_price: Option<Decimal>,
    pub change_7d_percent: Option<Decimal>,
    pub change_30d_percent: Option<Decimal>,
    pub change_90d_percent: Option<Decimal>,
    pub change_180d_percent: Option<Decimal>,
    pub change_365d_percent: Option<Decimal>,
    pub grading_entry_fee: Option<Decimal>,
    pub grading_fee_psa9: Option<Decimal>,
    pub grading_fee_psa10: Option<Decimal>,
    pub grading_profit_psa9: Option<Decimal>,
    pub grading_profit_psa10: Option<Decimal>,
    pub grading_roi_psa10: Option<Decimal>,
    pub grading_upcharge_potential: bool,
    pub grading_safety_tier: Option<String>,
}

/// Inserts or replaces the price row for `price.card_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, e.g. when the card does
/// not exist or the safety tier is not a recognised value.
pub async fn upsert_card_price(pool: &PgPool, price: &CardPriceUpsert) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO card_prices ( \
             card_id, marketplace_product_id, market_price, market_price_condition, \
             psa9_price, psa10_price, \
             change_7d_percent, change_30d_percent, change_90d_percent, \
             change_180d_percent, change_365d_percent, \
             grading_entry_fee, grading_fee_psa9, grading_fee_psa10, \
             grading_profit_psa9, grading_profit_psa10, grading_roi_psa10, \
             grading_upcharge_potential, grading_safety_tier, updated_at \
         ) VALUES ( \
             $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
             $12, $13, $14, $15, $16, $17, $18, $19, NOW() \
         ) \
         ON CONFLICT (card_id) DO UPDATE SET \
             marketplace_product_id = EXCLUDED.marketplace_product_id, \
             market_price = EXCLUDED.market_price, \
             market_price_condition = EXCLUDED.market_price_condition, \
             psa9_price = EXCLUDED.psa9_price, \
             psa10_price = EXCLUDED.psa10_price, \
             change_7d_percent = EXCLUDED.change_7d_percent, \
             change_30d_percent = EXCLUDED.change_30d_percent, \
             change_90d_percent = EXCLUDED.change_90d_percent, \
             change_180d_percent = EXCLUDED.change_180d_percent, \
             change_365d_percent = EXCLUDED.change_365d_percent, \
             grading_entry_fee = EXCLUDED.grading_entry_fee, \
             grading_fee_psa9 = EXCLUDED.grading_fee_psa9, \
             grading_fee_psa10 = EXCLUDED.grading_fee_psa10, \
             grading_profit_psa9 = EXCLUDED.grading_profit_psa9, \
             grading_profit_psa10 = EXCLUDED.grading_profit_psa10, \
             grading_roi_psa10 = EXCLUDED.grading_roi_psa10, \
             grading_upcharge_potential = EXCLUDED.grading_upcharge_potential, \
             grading_safety_tier = EXCLUDED.grading_safety_tier, \
             updated_at = NOW()",
    )
    .bind(&price.card_id)
    .bind(price.marketplace_product_id)
    .bind(price.market_price)
    .bind(price.market_price_condition.as_deref())
    .bind(price.psa9_price)
    .bind(price.psa10_price)
    .bind(price.change_7d_percent)
    .bind(price.change_30d_percent)
    .bind(price.change_90d_percent)
    .bind(price.change_180d_percent)
    .bind(price.change_365d_percent)
    .bind(price.grading_entry_fee)
    .bind(price.grading_fee_psa9)
    .bind(price.grading_fee_psa10)
    .bind(price.grading_profit_psa9)
    .bind(price.grading_profit_psa10)
    .bind(price.grading_roi_psa10)
    .bind(price.grading_upcharge_potential)
    .bind(price.grading_safety_tier.as_deref())
    .execute(pool)
    .await?;

    Ok(())
}

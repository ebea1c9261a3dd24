//! `sync-prices`: raw and graded prices plus a grading assessment per card.

use cardsync_db::CardPriceUpsert;
use cardsync_grading::{GradingAssessment, GradingCalculator};
use cardsync_sources::{normalize_card, PriceTrackerCard, PriceTrackerClient, PricedCard};

use crate::grade::load_calculator;
use crate::store::{CatalogStore, PgStore};
use crate::SetTarget;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PriceStats {
    pub fetched: usize,
    pub matched: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Catalog set id and the id the price tracker knows it by.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PricedSet {
    set_id: String,
    tracker_set_id: String,
}

/// Run `sync-prices` over the targeted sets.
///
/// # Errors
///
/// Returns an error if the API key is missing, the grading policy cannot be
/// loaded, the client cannot be built, or the set list cannot be read.
/// Per-set fetch failures and per-card write failures are logged and
/// counted.
pub(crate) async fn run_sync_prices(
    pool: &sqlx::PgPool,
    config: &cardsync_core::AppConfig,
    target: &SetTarget,
    dry_run: bool,
) -> anyhow::Result<()> {
    let api_key = config
        .price_tracker_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("PRICE_TRACKER_API_KEY is not set; cannot sync prices"))?;
    let calculator = load_calculator(config.grading_policy_path.as_deref())?;

    let client = PriceTrackerClient::new(
        &config.price_tracker_base_url,
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build price tracker client: {e}"))?;

    let sets = load_priced_sets(pool, target).await?;
    tracing::info!(sets = sets.len(), dry_run, "syncing prices");

    let store = PgStore::new(pool);
    let mut stats = PriceStats::default();

    for set in &sets {
        let cards = match client.fetch_set_cards(&set.tracker_set_id).await {
            Ok(cards) => cards,
            Err(e) => {
                tracing::error!(
                    set_id = %set.set_id,
                    tracker_set_id = %set.tracker_set_id,
                    error = %e,
                    "failed to fetch prices"
                );
                stats.errors += 1;
                continue;
            }
        };
        if let Err(e) =
            apply_set_prices(&store, &calculator, &set.set_id, &cards, dry_run, &mut stats).await
        {
            tracing::error!(set_id = %set.set_id, error = %e, "failed to load catalog cards");
            stats.errors += 1;
        }
    }

    println!("cards fetched: {}", stats.fetched);
    println!("cards matched: {}", stats.matched);
    println!("rows updated:  {}", stats.updated);
    println!("skipped:       {}", stats.skipped);
    println!("errors:        {}", stats.errors);
    if dry_run {
        println!("dry-run: no database changes were made");
    }

    Ok(())
}

async fn load_priced_sets(
    pool: &sqlx::PgPool,
    target: &SetTarget,
) -> anyhow::Result<Vec<PricedSet>> {
    let rows = match target {
        SetTarget::One(set_id) => {
            let set = cardsync_db::get_set(pool, set_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("set '{set_id}' not found"))?;
            vec![set]
        }
        SetTarget::All => cardsync_db::list_sets_with_price_tracker_id(pool).await?,
    };

    Ok(rows
        .into_iter()
        .map(|row| PricedSet {
            tracker_set_id: row.price_tracker_set_id.unwrap_or_else(|| row.id.clone()),
            set_id: row.id,
        })
        .collect())
}

/// Match one set's tracker cards to catalog cards by marketplace product id,
/// assess each match and store the result.
pub(crate) async fn apply_set_prices<S: CatalogStore>(
    store: &S,
    calculator: &GradingCalculator,
    set_id: &str,
    cards: &[PriceTrackerCard],
    dry_run: bool,
    stats: &mut PriceStats,
) -> Result<(), cardsync_db::DbError> {
    let by_product = store.cards_by_product_id(set_id).await?;

    for card in cards {
        stats.fetched += 1;
        let priced = normalize_card(card);

        let Some(card_id) = priced.product_id.and_then(|id| by_product.get(&id)) else {
            tracing::debug!(
                set_id,
                product_id = ?priced.product_id,
                name = %priced.name,
                "no catalog card for price-tracker card"
            );
            stats.skipped += 1;
            continue;
        };
        stats.matched += 1;

        let assessment =
            calculator.assess(priced.market_price, priced.grade9_price, priced.grade10_price);
        let row = price_row(card_id, &priced, &assessment);

        if dry_run {
            println!(
                "dry-run: {card_id} market={} psa9={} psa10={} tier={}",
                fmt_price(row.market_price),
                fmt_price(row.psa9_price),
                fmt_price(row.psa10_price),
                row.grading_safety_tier.as_deref().unwrap_or("-")
            );
            continue;
        }

        match store.upsert_card_price(&row).await {
            Ok(()) => stats.updated += 1,
            Err(e) => {
                tracing::warn!(card_id = %card_id, error = %e, "failed to store price");
                stats.errors += 1;
            }
        }
    }

    Ok(())
}

pub(crate) fn price_row(
    card_id: &str,
    priced: &PricedCard,
    assessment: &GradingAssessment,
) -> CardPriceUpsert {
    CardPriceUpsert {
        card_id: card_id.to_string(),
        marketplace_product_id: priced.product_id,
        market_price: priced.market_price,
        market_price_condition: Some(priced.market_condition.clone())
            .filter(|c| !c.is_empty()),
        psa9_price: priced.grade9_price,
        psa10_price: priced.grade10_price,
        change_7d_percent: priced.change_7d,
        change_30d_percent: priced.change_30d,
        change_90d_percent: priced.change_90d,
        change_180d_percent: priced.change_180d,
        change_365d_percent: priced.change_365d,
        grading_entry_fee: assessment.entry_fee,
        grading_fee_psa9: assessment.fee9,
        grading_fee_psa10: assessment.fee10,
        grading_profit_psa9: assessment.profit9,
        grading_profit_psa10: assessment.profit10,
        grading_roi_psa10: assessment.roi10,
        grading_upcharge_potential: assessment.upcharge_potential,
        grading_safety_tier: assessment.safety_tier.map(|t| t.as_str().to_string()),
    }
}

fn fmt_price(price: Option<rust_decimal::Decimal>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

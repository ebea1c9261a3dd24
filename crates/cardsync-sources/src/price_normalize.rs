use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::price_types::{CardPrices, HistoryPoint, PriceHistory, PriceTrackerCard};

const PREFERRED_VARIANT: &str = "Normal";
const PREFERRED_CONDITION: &str = "Near Mint";

/// Trailing history lengths (in points) reported as change windows.
pub const CHANGE_WINDOWS: [usize; 4] = [7, 30, 90, 180];

/// One price-tracker card reduced to what the catalog stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedCard {
    pub product_id: Option<i64>,
    pub name: String,
    pub market_price: Option<Decimal>,
    pub market_condition: String,
    pub grade9_price: Option<Decimal>,
    pub grade10_price: Option<Decimal>,
    pub change_7d: Option<Decimal>,
    pub change_30d: Option<Decimal>,
    pub change_90d: Option<Decimal>,
    pub change_180d: Option<Decimal>,
    pub change_365d: Option<Decimal>,
}

/// Percent change from the oldest to the newest market value, sorted by
/// date. `None` with fewer than two points, a missing endpoint value, or a
/// zero starting price.
#[must_use]
pub fn percent_change(history: &[HistoryPoint]) -> Option<Decimal> {
    if history.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&HistoryPoint> = history.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let oldest = sorted.first()?.market?;
    let newest = sorted.last()?.market?;
    if oldest.is_zero() {
        return None;
    }

    let change = (newest - oldest) / oldest * Decimal::ONE_HUNDRED;
    Some(change.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// History used for trend figures: variant `Normal` (else the first
/// variant), condition `Near Mint` (else the first condition).
#[must_use]
pub fn primary_history(history: &PriceHistory) -> &[HistoryPoint] {
    let variant = history
        .variants
        .get(PREFERRED_VARIANT)
        .or_else(|| history.variants.values().next());
    let Some(conditions) = variant else {
        return &[];
    };

    conditions
        .get(PREFERRED_CONDITION)
        .or_else(|| conditions.values().next())
        .map(|c| c.history.as_slice())
        .unwrap_or_default()
}

/// Market price and the condition it refers to: the first condition that
/// carries a non-zero market value, else `Near Mint`.
fn market_price_condition(prices: Option<&CardPrices>) -> (Option<Decimal>, String) {
    let Some(prices) = prices else {
        return (None, PREFERRED_CONDITION.to_owned());
    };

    let condition = prices
        .conditions
        .iter()
        .find(|(_, c)| c.market.is_some_and(|m| !m.is_zero()))
        .map_or_else(|| PREFERRED_CONDITION.to_owned(), |(name, _)| name.clone());

    (prices.market, condition)
}

fn graded_price(card: &PriceTrackerCard, grade_key: &str) -> Option<Decimal> {
    card.ebay
        .as_ref()?
        .sales_by_grade
        .get(grade_key)?
        .smart_market_price
        .as_ref()?
        .price
}

fn trailing(history: &[HistoryPoint], points: usize) -> &[HistoryPoint] {
    &history[history.len().saturating_sub(points)..]
}

/// Reduces a wire card to a [`PricedCard`].
#[must_use]
pub fn normalize_card(card: &PriceTrackerCard) -> PricedCard {
    let (market_price, market_condition) = market_price_condition(card.prices.as_ref());

    let history = card
        .price_history
        .as_ref()
        .map(primary_history)
        .unwrap_or_default();

    let [w7, w30, w90, w180] = CHANGE_WINDOWS.map(|n| percent_change(trailing(history, n)));

    PricedCard {
        product_id: card.tcg_player_id.as_ref().and_then(|id| id.as_i64()),
        name: card.name.clone().unwrap_or_default(),
        market_price,
        market_condition,
        grade9_price: graded_price(card, "psa9"),
        grade10_price: graded_price(card, "psa10"),
        change_7d: w7,
        change_30d: w30,
        change_90d: w90,
        change_180d: w180,
        change_365d: percent_change(history),
    }
}

#[cfg(test)]
#[path = "price_normalize_test.rs"]
mod tests;

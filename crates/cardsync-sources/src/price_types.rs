//! Wire types of the price-tracker `/cards` endpoint. Only the fields the
//! sync reads are modelled; everything is optional on the wire.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CardsResponse {
    #[serde(default)]
    pub data: Vec<PriceTrackerCard>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

/// The marketplace product id arrives as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductIdValue {
    Number(i64),
    Text(String),
}

impl ProductIdValue {
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceTrackerCard {
    #[serde(rename = "tcgPlayerId", default)]
    pub tcg_player_id: Option<ProductIdValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub prices: Option<CardPrices>,
    #[serde(default)]
    pub ebay: Option<EbayData>,
    #[serde(rename = "priceHistory", default)]
    pub price_history: Option<PriceHistory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardPrices {
    #[serde(default)]
    pub market: Option<Decimal>,
    #[serde(default)]
    pub conditions: BTreeMap<String, ConditionPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionPrice {
    #[serde(default)]
    pub market: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EbayData {
    #[serde(rename = "salesByGrade", default)]
    pub sales_by_grade: BTreeMap<String, GradeSales>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeSales {
    #[serde(rename = "smartMarketPrice", default)]
    pub smart_market_price: Option<SmartMarketPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmartMarketPrice {
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// `variant -> condition -> history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub variants: BTreeMap<String, BTreeMap<String, ConditionHistory>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionHistory {
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// ISO-8601; compared lexicographically.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub market: Option<Decimal>,
}

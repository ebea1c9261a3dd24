//! Unmapped-product records, the review report, and operator actions.
//!
//! A sync run writes every product it could not place into a report grouped
//! by set. The operator edits each record's `action` (and `card_id` for
//! updates) and the next run consumes the edited file as input.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cardsync_core::MarketplaceProduct;

pub const SINGLE_NOT_FOUND_REASON: &str = "Card not found in database";
pub const GROUP_NOT_FOUND_REASON: &str = "Multi-variant card not found in database";
const ALL_MAPPED_MESSAGE: &str = "All cards successfully mapped! No unmapped cards found.";

/// What the operator wants done with an unmapped record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputAction {
    /// Append the product(s) to the existing card named by `card_id`.
    Update,
    /// Create a synthetic `{set_id}-TCG{product_id}` card per product.
    Create,
    Skip,
    /// Leave for a later run. Unrecognised action strings land here too.
    #[default]
    #[serde(other)]
    Review,
}

/// Products carried by a record: one listing, or a whole variant group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnmappedProducts {
    Single {
        product_id: i64,
        product_name: String,
        tcg_product: MarketplaceProduct,
    },
    Group {
        product_ids: Vec<i64>,
        product_names: Vec<String>,
        tcg_products: Vec<MarketplaceProduct>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedRecord {
    #[serde(default)]
    pub set_id: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub action: InputAction,
    /// Target card for [`InputAction::Update`], filled in by the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(flatten)]
    pub products: UnmappedProducts,
}

impl UnmappedRecord {
    #[must_use]
    pub fn single(set_id: &str, card_number: &str, product: MarketplaceProduct) -> Self {
        Self {
            set_id: set_id.to_string(),
            card_number: card_number.to_string(),
            reason: SINGLE_NOT_FOUND_REASON.to_string(),
            action: InputAction::Review,
            card_id: None,
            products: UnmappedProducts::Single {
                product_id: product.product_id,
                product_name: product.name.clone(),
                tcg_product: product,
            },
        }
    }

    #[must_use]
    pub fn group(set_id: &str, card_number: &str, products: Vec<MarketplaceProduct>) -> Self {
        Self {
            set_id: set_id.to_string(),
            card_number: card_number.to_string(),
            reason: GROUP_NOT_FOUND_REASON.to_string(),
            action: InputAction::Review,
            card_id: None,
            products: UnmappedProducts::Group {
                product_ids: products.iter().map(|p| p.product_id).collect(),
                product_names: products.iter().map(|p| p.name.clone()).collect(),
                tcg_products: products,
            },
        }
    }

    /// The full marketplace listings this record carries.
    #[must_use]
    pub fn tcg_products(&self) -> &[MarketplaceProduct] {
        match &self.products {
            UnmappedProducts::Single { tcg_product, .. } => std::slice::from_ref(tcg_product),
            UnmappedProducts::Group { tcg_products, .. } => tcg_products,
        }
    }

    #[must_use]
    pub fn product_ids(&self) -> Vec<i64> {
        self.tcg_products().iter().map(|p| p.product_id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_unmapped: usize,
    pub sets_affected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecords {
    #[serde(default)]
    pub products: Vec<UnmappedRecord>,
}

/// Run report: every unmapped record grouped by set id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedReport {
    pub timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
    pub sets: BTreeMap<String, SetRecords>,
}

impl UnmappedReport {
    /// Groups records by `set_id`, keeping their order within each set.
    /// An empty report carries a success message.
    #[must_use]
    pub fn build(records: Vec<UnmappedRecord>, timestamp: DateTime<Utc>) -> Self {
        let total_unmapped = records.len();
        let mut sets: BTreeMap<String, SetRecords> = BTreeMap::new();
        for record in records {
            sets.entry(record.set_id.clone())
                .or_default()
                .products
                .push(record);
        }

        let message = (total_unmapped == 0).then(|| ALL_MAPPED_MESSAGE.to_string());

        Self {
            timestamp,
            summary: ReportSummary {
                total_unmapped,
                sets_affected: sets.len(),
                message,
            },
            sets,
        }
    }
}

/// Operator-edited records from a previous report, indexed by set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputActions {
    by_set: BTreeMap<String, Vec<UnmappedRecord>>,
    /// Records that could not be parsed and were ignored.
    pub rejected: usize,
}

impl InputActions {
    /// Reads any of the accepted input shapes:
    ///
    /// - `{"sets": {"<set_id>": {"products": [...]}}}` (report format)
    /// - `{"set_id": "<set_id>", "products": [...]}`
    /// - `[{"set_id": "<set_id>", ...}, ...]`
    ///
    /// Records missing a `set_id` inherit the one from their container.
    /// Malformed records are counted in [`InputActions::rejected`] and
    /// skipped; an unrecognised top-level shape yields no actions.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut out = Self::default();

        match value {
            serde_json::Value::Object(obj) => {
                if let Some(serde_json::Value::Object(sets)) = obj.get("sets") {
                    for (set_id, set_value) in sets {
                        if let Some(serde_json::Value::Array(records)) = set_value.get("products") {
                            out.extend(Some(set_id), records);
                        }
                    }
                } else if let (Some(serde_json::Value::String(set_id)), Some(serde_json::Value::Array(records))) =
                    (obj.get("set_id"), obj.get("products"))
                {
                    out.extend(Some(set_id), records);
                }
            }
            serde_json::Value::Array(records) => out.extend(None, records),
            _ => {}
        }

        out
    }

    fn extend(&mut self, set_id: Option<&String>, records: &[serde_json::Value]) {
        for raw in records {
            let Ok(mut record) = serde_json::from_value::<UnmappedRecord>(raw.clone()) else {
                self.rejected += 1;
                continue;
            };
            if let Some(set_id) = set_id {
                if record.set_id.is_empty() {
                    record.set_id.clone_from(set_id);
                } else if record.set_id != *set_id {
                    // A record filed under the wrong set is not trusted.
                    self.rejected += 1;
                    continue;
                }
            }
            if record.set_id.is_empty() {
                self.rejected += 1;
                continue;
            }
            self.by_set.entry(record.set_id.clone()).or_default().push(record);
        }
    }

    /// Records for `set_id` in file order.
    #[must_use]
    pub fn for_set(&self, set_id: &str) -> &[UnmappedRecord] {
        self.by_set
            .get(set_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records whose action is not [`InputAction::Review`].
    pub fn actionable(&self, set_id: &str) -> impl Iterator<Item = &UnmappedRecord> {
        self.for_set(set_id)
            .iter()
            .filter(|r| r.action != InputAction::Review)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_set.is_empty()
    }
}

#[cfg(test)]
#[path = "unmapped_test.rs"]
mod tests;

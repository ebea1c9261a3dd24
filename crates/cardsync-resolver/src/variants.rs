//! Variant-group classification and the persisted entry list.
//!
//! A catalog card accumulates one [`CardVariantEntry`] per marketplace
//! product across runs. Entries are only ever appended, keyed by
//! `product_id`, and at most one of them is primary.

use serde::{Deserialize, Serialize};

use cardsync_core::{CardVariantEntry, MarketplaceProduct, PatternType, VariantType};

use crate::pattern::classify_pattern;

/// One group member with its pattern and primary designation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProduct {
    pub product: MarketplaceProduct,
    pub pattern: PatternType,
    pub is_primary: bool,
}

/// A classified variant group. Always non-empty with exactly one primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGroup {
    members: Vec<ClassifiedProduct>,
}

impl ClassifiedGroup {
    #[must_use]
    pub fn members(&self) -> &[ClassifiedProduct] {
        &self.members
    }

    #[must_use]
    pub fn primary(&self) -> Option<&ClassifiedProduct> {
        self.members.iter().find(|m| m.is_primary)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Classifies every product and picks the primary: the first `base`
/// product, or the first product when none is `base`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn classify_variant_group(products: &[MarketplaceProduct]) -> Option<ClassifiedGroup> {
    if products.is_empty() {
        return None;
    }

    let patterns: Vec<PatternType> = products.iter().map(classify_pattern).collect();
    let primary_idx = patterns
        .iter()
        .position(|p| *p == PatternType::Base)
        .unwrap_or(0);

    let members = products
        .iter()
        .zip(patterns)
        .enumerate()
        .map(|(idx, (product, pattern))| ClassifiedProduct {
            product: product.clone(),
            pattern,
            is_primary: idx == primary_idx,
        })
        .collect();

    Some(ClassifiedGroup { members })
}

/// Printings a product of the given pattern stands for. Ball patterns only
/// cover themselves; everything else covers the standard printings.
#[must_use]
pub fn variant_types_for(pattern: PatternType) -> Vec<VariantType> {
    match pattern {
        PatternType::PokeBall => vec![VariantType::PokeBall],
        PatternType::MasterBall => vec![VariantType::MasterBall],
        PatternType::Base | PatternType::Special => {
            vec![VariantType::Normal, VariantType::Reverse, VariantType::Holo]
        }
    }
}

/// Entry for a single product outside of a group, e.g. an operator
/// `update` action. The pattern is classified from the name.
#[must_use]
pub fn entry_for_product(product: &MarketplaceProduct, is_primary: bool) -> CardVariantEntry {
    CardVariantEntry {
        product_id: product.product_id,
        pattern_types: variant_types_for(classify_pattern(product)),
        name: product.name.clone(),
        image_url: product.image_url.clone(),
        is_primary,
    }
}

/// Entries for every member of a classified group, in group order.
#[must_use]
pub fn build_variant_record_entries(group: &ClassifiedGroup) -> Vec<CardVariantEntry> {
    group
        .members
        .iter()
        .map(|m| CardVariantEntry {
            product_id: m.product.product_id,
            pattern_types: variant_types_for(m.pattern),
            name: m.product.name.clone(),
            image_url: m.product.image_url.clone(),
            is_primary: m.is_primary,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub entries: Vec<CardVariantEntry>,
    /// Number of incoming entries that were appended.
    pub added: usize,
}

impl MergeOutcome {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.added > 0
    }
}

/// Appends incoming entries whose `product_id` is not yet present.
///
/// Existing entries are never reordered or modified. An incoming primary
/// flag survives only if no primary exists yet, so the result has at most
/// one primary. Merging the same entries twice is a no-op.
#[must_use]
pub fn merge_entries(existing: &[CardVariantEntry], incoming: &[CardVariantEntry]) -> MergeOutcome {
    let mut entries = existing.to_vec();
    let mut has_primary = entries.iter().any(|e| e.is_primary);
    let mut added = 0;

    for entry in incoming {
        if entries.iter().any(|e| e.product_id == entry.product_id) {
            continue;
        }
        let mut entry = entry.clone();
        if entry.is_primary {
            if has_primary {
                entry.is_primary = false;
            } else {
                has_primary = true;
            }
        }
        entries.push(entry);
        added += 1;
    }

    MergeOutcome { entries, added }
}

/// The entry whose product supplies the card's headline marketplace id and
/// image: the primary, else the first entry.
#[must_use]
pub fn primary_entry(entries: &[CardVariantEntry]) -> Option<&CardVariantEntry> {
    entries.iter().find(|e| e.is_primary).or_else(|| entries.first())
}

/// Ball-pattern availability derived from a card's entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFlags {
    pub has_poke_ball: bool,
    pub has_master_ball: bool,
}

impl VariantFlags {
    #[must_use]
    pub fn from_entries(entries: &[CardVariantEntry]) -> Self {
        let has = |wanted: VariantType| {
            entries
                .iter()
                .any(|e| e.pattern_types.contains(&wanted))
        };
        Self {
            has_poke_ball: has(VariantType::PokeBall),
            has_master_ball: has(VariantType::MasterBall),
        }
    }
}

#[cfg(test)]
#[path = "variants_test.rs"]
mod tests;

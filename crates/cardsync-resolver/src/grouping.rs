use cardsync_core::MarketplaceProduct;

use crate::attributes::{extract_card_number, is_card_product};
use crate::number::normalize_number;

/// Products sharing one normalized card number within a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    pub card_number: String,
    /// Marketplace order is preserved; it decides the fallback primary.
    pub products: Vec<MarketplaceProduct>,
}

/// Result of splitting a group's product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductGroups {
    /// In order of each number's first appearance.
    pub groups: Vec<VariantGroup>,
    /// Card listings without a usable `"Number"` attribute.
    pub unclassifiable: Vec<MarketplaceProduct>,
    /// Sealed products and accessories.
    pub non_card: Vec<MarketplaceProduct>,
}

impl ProductGroups {
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.groups.iter().map(|g| g.products.len()).sum()
    }
}

/// Partitions products into card-number groups, unclassifiable card
/// listings, and non-card listings.
///
/// A number that normalizes to an empty string (`"/182"`) counts as missing.
#[must_use]
pub fn group_by_card_number<I>(products: I) -> ProductGroups
where
    I: IntoIterator<Item = MarketplaceProduct>,
{
    let mut out = ProductGroups::default();

    for product in products {
        if !is_card_product(&product) {
            out.non_card.push(product);
            continue;
        }

        let number = extract_card_number(&product)
            .map(|raw| normalize_number(raw).trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let Some(number) = number else {
            out.unclassifiable.push(product);
            continue;
        };

        match out.groups.iter_mut().find(|g| g.card_number == number) {
            Some(group) => group.products.push(product),
            None => out.groups.push(VariantGroup {
                card_number: number,
                products: vec![product],
            }),
        }
    }

    out
}

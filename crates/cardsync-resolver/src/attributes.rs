//! Lookups over a product's `extendedData` attribute list.

use cardsync_core::MarketplaceProduct;

/// Attribute names only card listings carry. Sealed products and
/// accessories have none of them.
pub const CARD_ATTRIBUTE_NAMES: [&str; 5] = ["Number", "Rarity", "HP", "Stage", "Card Type"];

/// Returns the raw `"Number"` attribute value, unmodified (may contain a
/// `printed/total` slash form such as `"023/182"`).
#[must_use]
pub fn extract_card_number(product: &MarketplaceProduct) -> Option<&str> {
    product.attribute("Number")
}

/// Returns the `"Rarity"` attribute value, if present.
#[must_use]
pub fn extract_rarity(product: &MarketplaceProduct) -> Option<&str> {
    product.attribute("Rarity")
}

/// `true` if the product carries at least one card-only attribute.
#[must_use]
pub fn is_card_product(product: &MarketplaceProduct) -> bool {
    CARD_ATTRIBUTE_NAMES
        .iter()
        .any(|name| product.has_attribute(name))
}

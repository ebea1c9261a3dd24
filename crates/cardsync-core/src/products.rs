use serde::{Deserialize, Serialize};

/// One `{name, value}` pair from a marketplace listing's `extendedData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedAttribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl ExtendedAttribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A sellable marketplace listing, normalized from the catalog API.
///
/// Serializes in the marketplace's own camelCase shape so the unmapped-cards
/// report can embed the product and an operator-edited copy can be read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceProduct {
    /// Marketplace numeric product ID (e.g., `545347`).
    #[serde(rename = "productId")]
    pub product_id: i64,
    /// Display name, e.g. `"Pikachu (Poke Ball Pattern)"`.
    pub name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    /// Ordered attribute list; lookups return the first matching name.
    #[serde(rename = "extendedData", default)]
    pub extended_attributes: Vec<ExtendedAttribute>,
}

impl MarketplaceProduct {
    /// Returns the value of the first attribute named `name`, if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.extended_attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns `true` if any attribute is named `name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.extended_attributes.iter().any(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(attrs: Vec<ExtendedAttribute>) -> MarketplaceProduct {
        MarketplaceProduct {
            product_id: 545_347,
            name: "Pikachu".to_string(),
            image_url: "https://img.example/545347.jpg".to_string(),
            extended_attributes: attrs,
        }
    }

    #[test]
    fn attribute_returns_first_match() {
        let product = make_product(vec![
            ExtendedAttribute::new("Number", "023/182"),
            ExtendedAttribute::new("Number", "999/999"),
        ]);
        assert_eq!(product.attribute("Number"), Some("023/182"));
    }

    #[test]
    fn attribute_is_case_sensitive() {
        let product = make_product(vec![ExtendedAttribute::new("Number", "023/182")]);
        assert_eq!(product.attribute("number"), None);
    }

    #[test]
    fn has_attribute_false_when_empty() {
        let product = make_product(vec![]);
        assert!(!product.has_attribute("Rarity"));
    }

    #[test]
    fn deserializes_marketplace_shape() {
        let json = r#"{
            "productId": 42,
            "name": "Charizard ex",
            "imageUrl": "https://img.example/42.jpg",
            "extendedData": [
                {"name": "Number", "displayName": "Card Number", "value": "006/165"},
                {"name": "Rarity", "value": "Double Rare"}
            ]
        }"#;
        let product: MarketplaceProduct = serde_json::from_str(json).expect("valid product json");
        assert_eq!(product.product_id, 42);
        assert_eq!(product.attribute("Number"), Some("006/165"));
        assert_eq!(product.attribute("Rarity"), Some("Double Rare"));
    }

    #[test]
    fn missing_image_and_attributes_default_to_empty() {
        let product: MarketplaceProduct =
            serde_json::from_str(r#"{"productId": 7, "name": "Booster Box"}"#)
                .expect("valid product json");
        assert!(product.image_url.is_empty());
        assert!(product.extended_attributes.is_empty());
    }
}

//! Foil-pattern classification from marketplace product names.

use cardsync_core::{MarketplaceProduct, PatternType};

const SPECIAL_KEYWORDS: [&str; 4] = ["rainbow", "secret", "gold", "alternate art"];

/// Classifies a product by its display name.
#[must_use]
pub fn classify_pattern(product: &MarketplaceProduct) -> PatternType {
    classify_name(&product.name)
}

/// Case-insensitive keyword match; first rule that matches wins:
///
/// 1. `"master ball"` → [`PatternType::MasterBall`]
/// 2. `"poke ball"` / `"pokeball"` → [`PatternType::PokeBall`]
/// 3. `"rainbow"`, `"secret"`, `"gold"`, `"alternate art"` → [`PatternType::Special`]
/// 4. anything else → [`PatternType::Base`]
///
/// Ball patterns are checked before the broader special bucket so a name
/// carrying both kinds of token is still identified by its ball pattern.
#[must_use]
pub fn classify_name(name: &str) -> PatternType {
    let lower = name.to_lowercase();

    if lower.contains("master ball") {
        PatternType::MasterBall
    } else if lower.contains("poke ball") || lower.contains("pokeball") {
        PatternType::PokeBall
    } else if SPECIAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        PatternType::Special
    } else {
        PatternType::Base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poke_ball_pattern() {
        assert_eq!(
            classify_name("Charizard Poke Ball Pattern"),
            PatternType::PokeBall
        );
        assert_eq!(classify_name("Eevee (Pokeball Pattern)"), PatternType::PokeBall);
    }

    #[test]
    fn master_ball_pattern() {
        assert_eq!(classify_name("Pikachu Master Ball"), PatternType::MasterBall);
    }

    #[test]
    fn special_keywords() {
        assert_eq!(
            classify_name("Pikachu VMAX Rainbow Rare"),
            PatternType::Special
        );
        assert_eq!(classify_name("Mew (Secret)"), PatternType::Special);
        assert_eq!(classify_name("Energy (Gold)"), PatternType::Special);
        assert_eq!(
            classify_name("Umbreon VMAX (Alternate Art)"),
            PatternType::Special
        );
    }

    #[test]
    fn plain_name_is_base() {
        assert_eq!(classify_name("Pikachu"), PatternType::Base);
        assert_eq!(classify_name(""), PatternType::Base);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_name("PIKACHU MASTER BALL"), PatternType::MasterBall);
        assert_eq!(classify_name("pikachu poke ball"), PatternType::PokeBall);
        assert_eq!(classify_name("GOLDEN"), PatternType::Special);
    }

    #[test]
    fn master_ball_beats_poke_ball() {
        assert_eq!(
            classify_name("Poke Ball and Master Ball Bundle"),
            PatternType::MasterBall
        );
    }

    #[test]
    fn ball_pattern_beats_special_keyword() {
        assert_eq!(
            classify_name("Gold Charizard (Poke Ball Pattern)"),
            PatternType::PokeBall
        );
        assert_eq!(
            classify_name("Secret Mew (Master Ball Pattern)"),
            PatternType::MasterBall
        );
    }

    #[test]
    fn classify_pattern_reads_product_name() {
        let product = MarketplaceProduct {
            product_id: 1,
            name: "Snorlax (Master Ball Pattern)".to_string(),
            image_url: String::new(),
            extended_attributes: vec![],
        };
        assert_eq!(classify_pattern(&product), PatternType::MasterBall);
    }
}

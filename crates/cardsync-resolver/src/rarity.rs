use cardsync_core::PrintingFlags;

/// Rarities printed with normal and reverse-holo variants.
const STANDARD_RARITIES: [&str; 4] = ["Common", "Uncommon", "Rare", "Rare Holo"];

/// Printing flags for a card created from a marketplace product.
///
/// Standard rarities keep the given flags (all `false` when none are known).
/// Every other rarity is holo-only; `first_edition` is carried over.
#[must_use]
pub fn correct_variants(rarity: Option<&str>, flags: Option<PrintingFlags>) -> PrintingFlags {
    let is_standard = rarity.is_some_and(|r| STANDARD_RARITIES.contains(&r.trim()));

    if is_standard {
        return flags.unwrap_or_default();
    }

    PrintingFlags {
        normal: false,
        reverse: false,
        holo: true,
        first_edition: flags.is_some_and(|f| f.first_edition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: PrintingFlags = PrintingFlags {
        normal: true,
        reverse: true,
        holo: true,
        first_edition: true,
    };

    #[test]
    fn standard_rarity_keeps_flags() {
        for rarity in STANDARD_RARITIES {
            assert_eq!(correct_variants(Some(rarity), Some(ALL)), ALL, "{rarity}");
        }
    }

    #[test]
    fn standard_rarity_without_flags_is_all_false() {
        assert_eq!(
            correct_variants(Some("Common"), None),
            PrintingFlags::default()
        );
    }

    #[test]
    fn special_rarity_is_holo_only() {
        let corrected = correct_variants(Some("Illustration Rare"), Some(ALL));
        assert_eq!(
            corrected,
            PrintingFlags {
                normal: false,
                reverse: false,
                holo: true,
                first_edition: true,
            }
        );
    }

    #[test]
    fn unknown_rarity_is_holo_only() {
        let corrected = correct_variants(None, None);
        assert!(corrected.holo);
        assert!(!corrected.normal);
        assert!(!corrected.reverse);
        assert!(!corrected.first_edition);
    }

    #[test]
    fn rarity_match_is_exact() {
        assert!(correct_variants(Some("Rare Holo V"), Some(ALL)).holo);
        assert!(!correct_variants(Some("Rare Holo V"), Some(ALL)).normal);
        assert!(!correct_variants(Some("common"), Some(ALL)).normal);
    }
}

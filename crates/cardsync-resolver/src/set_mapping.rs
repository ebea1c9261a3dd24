//! Marketplace group → catalog set matching.

use std::sync::LazyLock;

use regex::Regex;

/// Price-guide pages for the category live under this path.
pub const PRICE_GUIDE_URL_BASE: &str =
    "https://www.tcgplayer.com/categories/trading-and-collectible-card-games/pokemon/price-guides";

static GROUP_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+)(\d+(?:\.\d+)?[a-z]?):").expect("valid group code regex")
});
static LEADING_ZEROS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+(\d)").expect("valid leading zero regex"));
static SET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(\d+)(.*)$").expect("valid set id regex"));
static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug charset regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static DASH_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("valid dash regex"));

/// Extracts a catalog set id from a group name's code prefix.
///
/// `"SV10: Destined Rivals"` → `"sv10"`, `"SWSH07: Evolving Skies"` →
/// `"swsh7"`. Names without an uppercase code followed by a colon
/// (`"Crown Zenith Galarian Gallery"`) yield `None`.
#[must_use]
pub fn extract_set_id_from_group_name(name: &str) -> Option<String> {
    let caps = GROUP_CODE_RE.captures(name)?;
    let prefix = caps.get(1)?.as_str().to_lowercase();
    let number = caps.get(2)?.as_str();

    let number = LEADING_ZEROS_RE.replace(number, "$1");

    Some(format!("{prefix}{number}"))
}

/// Resolves a group name to a set id the catalog knows about.
///
/// Tries the extracted id first, then, when its numeric part is a single
/// digit, the zero-padded spelling (`swsh7` → `swsh07`).
#[must_use]
pub fn auto_map_group<F>(group_name: &str, set_exists: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let extracted = extract_set_id_from_group_name(group_name)?;
    if set_exists(&extracted) {
        return Some(extracted);
    }

    let caps = SET_ID_RE.captures(&extracted)?;
    let digits = caps.get(2)?.as_str();
    if digits.len() != 1 {
        return None;
    }
    let alt = format!("{}0{digits}{}", &caps[1], &caps[3]);
    set_exists(&alt).then_some(alt)
}

/// URL slug of a group name: `"SV10: Destined Rivals"` →
/// `"sv10-destined-rivals"`.
#[must_use]
pub fn marketplace_url_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lower, "");
    let dashed = WHITESPACE_RE.replace_all(stripped.trim(), "-");
    DASH_RUN_RE.replace_all(&dashed, "-").into_owned()
}

/// Full price-guide URL stored on a mapped set.
#[must_use]
pub fn price_guide_url(group_name: &str) -> String {
    format!("{PRICE_GUIDE_URL_BASE}/{}", marketplace_url_slug(group_name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn extracts_code_prefix() {
        assert_eq!(
            extract_set_id_from_group_name("SV10: Destined Rivals").as_deref(),
            Some("sv10")
        );
        assert_eq!(
            extract_set_id_from_group_name("SM11.5: Hidden Fates").as_deref(),
            Some("sm11.5")
        );
    }

    #[test]
    fn strips_leading_zeros_but_keeps_one_digit() {
        assert_eq!(
            extract_set_id_from_group_name("SWSH07: Evolving Skies").as_deref(),
            Some("swsh7")
        );
        assert_eq!(
            extract_set_id_from_group_name("SV0: Promo").as_deref(),
            Some("sv0")
        );
    }

    #[test]
    fn names_without_code_yield_none() {
        assert_eq!(extract_set_id_from_group_name("Crown Zenith"), None);
        assert_eq!(extract_set_id_from_group_name("sv10: lowercase"), None);
        assert_eq!(extract_set_id_from_group_name("SV10 Destined Rivals"), None);
    }

    #[test]
    fn auto_map_uses_extracted_id_when_known() {
        let sets: HashSet<&str> = ["sv10"].into_iter().collect();
        assert_eq!(
            auto_map_group("SV10: Destined Rivals", |id| sets.contains(id)).as_deref(),
            Some("sv10")
        );
    }

    #[test]
    fn auto_map_tries_zero_padded_single_digit() {
        let sets: HashSet<&str> = ["swsh07", "sv03.5"].into_iter().collect();
        assert_eq!(
            auto_map_group("SWSH07: Evolving Skies", |id| sets.contains(id)).as_deref(),
            Some("swsh07")
        );
        assert_eq!(
            auto_map_group("SV3.5: 151", |id| sets.contains(id)).as_deref(),
            Some("sv03.5")
        );
    }

    #[test]
    fn auto_map_gives_up_on_unknown_sets() {
        let sets: HashSet<&str> = HashSet::new();
        assert_eq!(auto_map_group("SV10: Destined Rivals", |id| sets.contains(id)), None);
        assert_eq!(auto_map_group("Celebrations", |_| true), None);
    }

    #[test]
    fn slug_from_group_name() {
        assert_eq!(marketplace_url_slug("SV10: Destined Rivals"), "sv10-destined-rivals");
        assert_eq!(
            marketplace_url_slug("  Pokemon GO -- Special  Set! "),
            "pokemon-go-special-set"
        );
        assert_eq!(marketplace_url_slug("McDonald's Promos 2023"), "mcdonalds-promos-2023");
    }

    #[test]
    fn mapping_a_full_group_list_is_stable_across_calls() {
        let sets: HashSet<String> = (1..=12).map(|n| format!("sv{n}")).collect();
        let names: Vec<String> = (1..=12).map(|n| format!("SV{n:02}: Set {n}")).collect();

        for _ in 0..3 {
            let mapped: Vec<Option<String>> = names
                .iter()
                .map(|name| auto_map_group(name, |id| sets.contains(id)))
                .collect();
            assert!(mapped.iter().all(Option::is_some), "{mapped:?}");
            assert_eq!(mapped[0].as_deref(), Some("sv1"));
            assert_eq!(mapped[11].as_deref(), Some("sv12"));
            assert_eq!(marketplace_url_slug(&names[0]), "sv01-set-1");
        }
    }

    #[test]
    fn price_guide_url_joins_slug() {
        assert_eq!(
            price_guide_url("SV10: Destined Rivals"),
            format!("{PRICE_GUIDE_URL_BASE}/sv10-destined-rivals")
        );
    }
}

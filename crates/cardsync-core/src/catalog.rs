use serde::{Deserialize, Serialize};

/// Composite catalog identifier `{set_id}-{local_number}`.
///
/// `local_number` is kept exactly as generated; equivalent spellings
/// (`"023"` vs `"23"`) are distinct keys and are enumerated by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogKey {
    pub set_id: String,
    pub local_number: String,
}

impl CatalogKey {
    #[must_use]
    pub fn new(set_id: impl Into<String>, local_number: impl Into<String>) -> Self {
        Self {
            set_id: set_id.into(),
            local_number: local_number.into(),
        }
    }

    /// Key of a card created directly from a marketplace product:
    /// `{set_id}-TCG{product_id}`.
    #[must_use]
    pub fn synthetic(set_id: impl Into<String>, product_id: i64) -> Self {
        Self::new(set_id, format!("TCG{product_id}"))
    }

    /// The catalog row id this key addresses.
    #[must_use]
    pub fn card_id(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.set_id, self.local_number)
    }
}

/// Foil/print treatment inferred from a marketplace product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Base,
    PokeBall,
    MasterBall,
    Special,
}

impl PatternType {
    /// Ball patterns are sold as separate listings that only cover their own
    /// treatment.
    #[must_use]
    pub fn is_ball_pattern(self) -> bool {
        matches!(self, PatternType::PokeBall | PatternType::MasterBall)
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternType::Base => write!(f, "base"),
            PatternType::PokeBall => write!(f, "poke_ball"),
            PatternType::MasterBall => write!(f, "master_ball"),
            PatternType::Special => write!(f, "special"),
        }
    }
}

/// A printing a catalog card entry can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    Normal,
    Reverse,
    Holo,
    PokeBall,
    MasterBall,
}

/// One marketplace product attached to a catalog card, as persisted in the
/// card's variant-entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVariantEntry {
    pub product_id: i64,
    /// Stored under `variant_types` in the catalog's JSON column.
    #[serde(rename = "variant_types", alias = "pattern_types", default)]
    pub pattern_types: Vec<VariantType>,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Printing availability flags of a catalog card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintingFlags {
    pub normal: bool,
    pub reverse: bool,
    pub holo: bool,
    pub first_edition: bool,
}

//! Identity resolution between marketplace listings and catalog cards.
//!
//! Everything here is a pure function over in-memory values: callers fetch
//! products, probe the catalog store with the generated keys, and persist
//! the resulting entries.

pub mod attributes;
pub mod candidates;
pub mod grouping;
pub mod number;
pub mod pattern;
pub mod rarity;
pub mod set_mapping;
pub mod unmapped;
pub mod variants;

pub use attributes::{extract_card_number, extract_rarity, is_card_product, CARD_ATTRIBUTE_NAMES};
pub use candidates::{resolve_candidate_keys, synthetic_key};
pub use grouping::{group_by_card_number, ProductGroups, VariantGroup};
pub use number::normalize_number;
pub use pattern::{classify_name, classify_pattern};
pub use rarity::correct_variants;
pub use set_mapping::{
    auto_map_group, extract_set_id_from_group_name, marketplace_url_slug, price_guide_url,
    PRICE_GUIDE_URL_BASE,
};
pub use unmapped::{
    InputAction, InputActions, ReportSummary, SetRecords, UnmappedProducts, UnmappedRecord,
    UnmappedReport,
};
pub use variants::{
    build_variant_record_entries, classify_variant_group, entry_for_product, merge_entries,
    primary_entry, variant_types_for, ClassifiedGroup, ClassifiedProduct, MergeOutcome,
    VariantFlags,
};

//! Candidate catalog keys for a normalized card number.
//!
//! Catalog numbering is inconsistently zero-padded and letter-prefixed
//! across eras, so a lookup enumerates the realistic spellings and the
//! caller accepts the first key that exists.

use cardsync_core::CatalogKey;

use crate::number::{is_all_digits, split_letter_prefix, trim_leading_zeros, zero_pad};

const PADDED_WIDTH: usize = 3;
const SHORT_SUFFIX_WIDTH: usize = 2;

/// Ordered, deduplicated catalog keys to probe, most specific first:
///
/// 1. the number as given (`"023"`)
/// 2. leading zeros stripped, keeping one digit (`"23"`)
/// 3. purely numeric and shorter than three digits: padded to three (`"007"`)
/// 4. letters followed by digits (`"BW004"`): last two suffix digits unless
///    they are `00` (`"BW04"`),
///    zero-stripped suffix (`"BW4"`), three-digit padded suffix (`"BW004"`)
///
/// The list is never empty. Synthetic `TCG{product_id}` keys are not part of
/// plain lookup; see [`synthetic_key`].
#[must_use]
pub fn resolve_candidate_keys(set_id: &str, normalized_number: &str) -> Vec<CatalogKey> {
    let mut numbers: Vec<String> = Vec::with_capacity(6);
    let mut push = |candidate: String| {
        if !numbers.contains(&candidate) {
            numbers.push(candidate);
        }
    };

    push(normalized_number.to_string());

    let trimmed = trim_leading_zeros(normalized_number);
    if !trimmed.is_empty() {
        push(trimmed.to_string());
    }

    if is_all_digits(normalized_number) && normalized_number.len() < PADDED_WIDTH {
        push(zero_pad(normalized_number, PADDED_WIDTH));
    }

    if let Some((letters, digits)) = split_letter_prefix(normalized_number) {
        if digits.len() > SHORT_SUFFIX_WIDTH {
            let last_two = &digits[digits.len() - SHORT_SUFFIX_WIDTH..];
            if last_two != "00" {
                push(format!("{letters}{last_two}"));
            }
        }

        push(format!("{letters}{}", trim_leading_zeros(digits)));

        if digits.len() < PADDED_WIDTH {
            push(format!("{letters}{}", zero_pad(digits, PADDED_WIDTH)));
        }
    }

    numbers
        .into_iter()
        .map(|n| CatalogKey::new(set_id, n))
        .collect()
}

/// Key reserved for a card created directly from a marketplace product.
///
/// Used by the create flow and to skip products that already own a
/// synthetic card; never produced by [`resolve_candidate_keys`].
#[must_use]
pub fn synthetic_key(set_id: &str, product_id: i64) -> CatalogKey {
    CatalogKey::synthetic(set_id, product_id)
}

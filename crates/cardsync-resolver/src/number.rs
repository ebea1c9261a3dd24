//! Card-number normalization and shape helpers.

/// Drops the `/total` denominator of a printed card number.
///
/// `"023/182"` becomes `"023"`; values without a slash (`"XY01"`) are
/// returned unchanged.
#[must_use]
pub fn normalize_number(raw: &str) -> &str {
    match raw.split_once('/') {
        Some((printed, _)) => printed,
        None => raw,
    }
}

/// Strips leading zeros, keeping at least one digit (`"007"` → `"7"`,
/// `"000"` → `"0"`).
#[must_use]
pub(crate) fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        &digits[digits.len() - 1..]
    } else {
        trimmed
    }
}

/// `true` for a non-empty, all-ASCII-digit string.
#[must_use]
pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `"BW004"` into `("BW", "004")`.
///
/// Returns `None` unless the token is one or more ASCII letters followed by
/// one or more ASCII digits and nothing else.
#[must_use]
pub(crate) fn split_letter_prefix(token: &str) -> Option<(&str, &str)> {
    let split = token.bytes().position(|b| !b.is_ascii_alphabetic())?;
    if split == 0 {
        return None;
    }
    let (letters, digits) = token.split_at(split);
    is_all_digits(digits).then_some((letters, digits))
}

/// Left-pads `digits` with zeros to `width`.
#[must_use]
pub(crate) fn zero_pad(digits: &str, width: usize) -> String {
    format!("{digits:0>width$}")
}

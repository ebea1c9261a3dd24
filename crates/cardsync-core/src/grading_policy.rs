//! Business constants of the grading-economics calculator.
//!
//! The built-in [`GradingPolicy::default`] carries the grading service's
//! published fee ladder and the submission thresholds. Operators can
//! override any field from a YAML file; omitted fields keep their defaults.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One rung of the fee ladder: declared values up to and including
/// `ceiling` pay `fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub ceiling: Decimal,
    pub fee: Decimal,
}

impl FeeTier {
    #[must_use]
    pub fn new(ceiling: Decimal, fee: Decimal) -> Self {
        Self { ceiling, fee }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingPolicy {
    /// Ascending by `ceiling`. The last rung is also the base of the
    /// open-ended overflow tier.
    pub fee_ladder: Vec<FeeTier>,
    /// Added per started `overflow_step` above the last ceiling.
    pub overflow_increment: Decimal,
    pub overflow_step: Decimal,
    /// Flat return-shipping cost added to every submission.
    pub shipping_flat: Decimal,
    /// Minimum grade-10 profit for a submission that is already profitable
    /// at grade 9 to count as a safe bet.
    pub safe_bet_min_grade10_profit: Decimal,
    /// Grade-10 ROI (percent) that must be exceeded for a gamble.
    pub gamble_min_roi_percent: Decimal,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        let tier = |ceiling: i64, fee_cents: i64| FeeTier::new(Decimal::from(ceiling), Decimal::new(fee_cents, 2));
        Self {
            fee_ladder: vec![
                tier(499, 1999),
                tier(999, 5999),
                tier(1_499, 7499),
                tier(2_499, 12900),
                tier(4_999, 19900),
                tier(9_999, 49900),
                tier(24_999, 99900),
                tier(49_999, 199_900),
                tier(99_999, 299_900),
                tier(199_999, 499_900),
                tier(350_000, 999_900),
            ],
            overflow_increment: Decimal::new(39900, 2),
            overflow_step: Decimal::from(10_000),
            shipping_flat: Decimal::new(999, 2),
            safe_bet_min_grade10_profit: Decimal::new(2000, 2),
            gamble_min_roi_percent: Decimal::from(125),
        }
    }
}

impl GradingPolicy {
    /// Lowest rung of the ladder. Validation guarantees the ladder is non-empty.
    #[must_use]
    pub fn lowest_tier(&self) -> Option<&FeeTier> {
        self.fee_ladder.first()
    }

    /// Highest fixed rung, the base of the overflow tier.
    #[must_use]
    pub fn highest_tier(&self) -> Option<&FeeTier> {
        self.fee_ladder.last()
    }

    /// Checks the invariants the calculator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the ladder is empty, not
    /// strictly ascending, has a negative fee, or the overflow step is not
    /// positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fee_ladder.is_empty() {
            return Err(ConfigError::Validation(
                "grading fee ladder must have at least one tier".to_string(),
            ));
        }

        for pair in self.fee_ladder.windows(2) {
            if pair[1].ceiling <= pair[0].ceiling {
                return Err(ConfigError::Validation(format!(
                    "fee ladder ceilings must be strictly ascending ({} then {})",
                    pair[0].ceiling, pair[1].ceiling
                )));
            }
        }

        if let Some(tier) = self.fee_ladder.iter().find(|t| t.fee.is_sign_negative()) {
            return Err(ConfigError::Validation(format!(
                "fee for ceiling {} must not be negative",
                tier.ceiling
            )));
        }

        if self.overflow_step <= Decimal::ZERO {
            return Err(ConfigError::Validation(
                "overflow_step must be greater than zero".to_string(),
            ));
        }

        if self.overflow_increment.is_sign_negative() || self.shipping_flat.is_sign_negative() {
            return Err(ConfigError::Validation(
                "overflow_increment and shipping_flat must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load and validate a grading policy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_grading_policy(path: &Path) -> Result<GradingPolicy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let policy: GradingPolicy =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.display().to_string(),
            source: e,
        })?;

    policy.validate()?;
    Ok(policy)
}

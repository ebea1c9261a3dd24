use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Submission recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyTier {
    /// Profitable at grade 9 and clearly profitable at grade 10.
    SafeBet,
    /// Only a grade 10 pays off, but with a high return.
    Gamble,
    DoNotGrade,
}

impl SafetyTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SafeBet => "SAFE_BET",
            Self::Gamble => "GAMBLE",
            Self::DoNotGrade => "DO_NOT_GRADE",
        }
    }
}

impl std::fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculator output for one card. Every field is `None` (and the flag
/// `false`) when there was not enough price data to evaluate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingAssessment {
    /// Fee for the tier the raw price is declared in.
    pub entry_fee: Option<Decimal>,
    /// Entry fee plus flat shipping.
    pub entry_cost_basis: Option<Decimal>,
    pub fee9: Option<Decimal>,
    pub fee10: Option<Decimal>,
    pub profit9: Option<Decimal>,
    pub profit10: Option<Decimal>,
    /// Percent return on total grade-10 cost.
    pub roi10: Option<Decimal>,
    /// The realised grade would push the card into a higher fee tier.
    pub upcharge_potential: bool,
    pub safety_tier: Option<SafetyTier>,
}

impl GradingAssessment {
    /// The all-`None` result for insufficient data.
    #[must_use]
    pub fn insufficient() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        *self == Self::default()
    }
}

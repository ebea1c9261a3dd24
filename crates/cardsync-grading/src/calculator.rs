use rust_decimal::{Decimal, RoundingStrategy};

use cardsync_core::GradingPolicy;

use crate::assessment::{GradingAssessment, SafetyTier};

/// Grading-economics calculator bound to one policy.
#[derive(Debug, Clone, Default)]
pub struct GradingCalculator {
    policy: GradingPolicy,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

impl GradingCalculator {
    #[must_use]
    pub fn new(policy: GradingPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// Fee for a declared value.
    ///
    /// The smallest ladder ceiling at or above the value decides the fee.
    /// Above the last ceiling the fee grows by `overflow_increment` per
    /// started `overflow_step`. Absent, zero and negative values pay the
    /// lowest fee. Defined for every input; arithmetic that would overflow
    /// saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn grading_fee(&self, declared_value: Option<Decimal>) -> Decimal {
        let (Some(lowest), Some(highest)) = (self.policy.lowest_tier(), self.policy.highest_tier())
        else {
            return Decimal::ZERO;
        };

        let Some(value) = positive(declared_value) else {
            return lowest.fee;
        };

        if let Some(tier) = self.policy.fee_ladder.iter().find(|t| value <= t.ceiling) {
            return tier.fee;
        }

        let steps = (value - highest.ceiling)
            .checked_div(self.policy.overflow_step)
            .map(|s| s.ceil());
        let Some(steps) = steps else {
            return highest.fee;
        };

        self.policy
            .overflow_increment
            .checked_mul(steps)
            .and_then(|extra| highest.fee.checked_add(extra))
            .unwrap_or(Decimal::MAX)
    }

    /// Assesses a grading submission.
    ///
    /// Returns [`GradingAssessment::insufficient`] when the raw price is
    /// absent or not positive, or when neither graded price is given.
    /// Graded prices that are zero or negative are ignored.
    #[must_use]
    pub fn assess(
        &self,
        raw_price: Option<Decimal>,
        grade9_price: Option<Decimal>,
        grade10_price: Option<Decimal>,
    ) -> GradingAssessment {
        let Some(raw) = positive(raw_price) else {
            return GradingAssessment::insufficient();
        };
        if grade9_price.is_none() && grade10_price.is_none() {
            return GradingAssessment::insufficient();
        }

        let shipping = self.policy.shipping_flat;
        let entry_fee = self.grading_fee(Some(raw));
        let tier_fee = |graded: Decimal| entry_fee.max(self.grading_fee(Some(graded)));

        let grade9 = positive(grade9_price).map(|price| {
            let fee = tier_fee(price);
            let total_cost = fee + shipping + raw;
            (fee, round2(price - total_cost))
        });

        let grade10 = positive(grade10_price).map(|price| {
            let fee = tier_fee(price);
            let total_cost = fee + shipping + raw;
            let profit = price - total_cost;
            let roi = (!total_cost.is_zero())
                .then(|| round2(Decimal::ONE_HUNDRED * profit / total_cost));
            (fee, round2(profit), roi)
        });

        let fee9 = grade9.map(|(fee, _)| fee);
        let profit9 = grade9.map(|(_, profit)| profit);
        let fee10 = grade10.map(|(fee, _, _)| fee);
        let profit10 = grade10.map(|(_, profit, _)| profit);
        let roi10 = grade10.and_then(|(_, _, roi)| roi);

        let upcharge_potential =
            fee9.is_some_and(|f| f > entry_fee) || fee10.is_some_and(|f| f > entry_fee);

        GradingAssessment {
            entry_fee: Some(entry_fee),
            entry_cost_basis: Some(entry_fee + shipping),
            fee9,
            fee10,
            profit9,
            profit10,
            roi10,
            upcharge_potential,
            safety_tier: self.safety_tier(profit9, profit10, roi10),
        }
    }

    fn safety_tier(
        &self,
        profit9: Option<Decimal>,
        profit10: Option<Decimal>,
        roi10: Option<Decimal>,
    ) -> Option<SafetyTier> {
        let gamble = roi10.is_some_and(|roi| roi > self.policy.gamble_min_roi_percent)
            && profit10.is_some_and(|p| p > Decimal::ZERO);

        match (profit9, profit10) {
            (Some(p9), _) => {
                let safe = p9 >= Decimal::ZERO
                    && profit10.is_some_and(|p| p >= self.policy.safe_bet_min_grade10_profit);
                Some(if safe {
                    SafetyTier::SafeBet
                } else if gamble {
                    SafetyTier::Gamble
                } else {
                    SafetyTier::DoNotGrade
                })
            }
            (None, Some(_)) => Some(if gamble {
                SafetyTier::Gamble
            } else {
                SafetyTier::DoNotGrade
            }),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;

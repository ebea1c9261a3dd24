use std::path::Path;

use rust_decimal::Decimal;

use cardsync_core::{load_grading_policy, GradingPolicy};
use cardsync_grading::{GradingAssessment, GradingCalculator};

/// Calculator for the policy at `path`, or the built-in policy.
///
/// # Errors
///
/// Returns an error if the policy file cannot be read, parsed or validated.
pub(crate) fn load_calculator(path: Option<&Path>) -> anyhow::Result<GradingCalculator> {
    let policy = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading grading policy");
            load_grading_policy(path)?
        }
        None => GradingPolicy::default(),
    };
    Ok(GradingCalculator::new(policy))
}

pub(crate) fn assess_prices(
    calculator: &GradingCalculator,
    raw: Decimal,
    grade9: Option<Decimal>,
    grade10: Option<Decimal>,
) -> GradingAssessment {
    calculator.assess(Some(raw), grade9, grade10)
}

/// Print the assessment for one set of prices as pretty JSON.
///
/// # Errors
///
/// Returns an error if the policy cannot be loaded or the result cannot be
/// serialized.
pub(crate) fn run_grade(
    raw: Decimal,
    grade9: Option<Decimal>,
    grade10: Option<Decimal>,
    policy_path: Option<&Path>,
) -> anyhow::Result<()> {
    let calculator = load_calculator(policy_path)?;
    let assessment = assess_prices(&calculator, raw, grade9, grade10);
    if assessment.is_insufficient() {
        tracing::warn!("not enough price data to assess grading");
    }
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

//! Grading economics: what it costs to submit a card for grading and what
//! the submission returns at grade 9 and grade 10.
//!
//! Pure computation over [`rust_decimal::Decimal`] prices. Fee ladder and
//! thresholds come from a [`cardsync_core::GradingPolicy`].

mod assessment;
mod calculator;

pub use assessment::{GradingAssessment, SafetyTier};
pub use calculator::GradingCalculator;

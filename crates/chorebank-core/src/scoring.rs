//! Quality-score to point-award arithmetic.

use chorebank_domain::QualityScore;
use rust_decimal::{Decimal, RoundingStrategy};

/// Stateless award math shared by every scoring call site.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Converts a quality score into a point award against a base value.
    ///
    /// `base * score / 100`, rounded half-up to one decimal place. A score of
    /// 100 returns the base exactly; scores above 100 pay a bonus, negative
    /// scores produce a deduction.
    pub fn compute_award(base_points: Decimal, score: QualityScore) -> Decimal {
        let raw = base_points * Decimal::from(score.value()) / Decimal::from(100);
        raw.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Resolves the score that actually applies to a decision.
    ///
    /// An explicit score always wins. Otherwise: approval counts as full
    /// credit; denial of a required chore costs exactly what completing it
    /// would have earned; denial of an optional chore awards nothing.
    pub fn effective_score(
        score: Option<QualityScore>,
        approved: bool,
        chore_is_required: bool,
    ) -> QualityScore {
        match (score, approved, chore_is_required) {
            (Some(explicit), _, _) => explicit,
            (None, true, _) => QualityScore::FULL,
            (None, false, true) => QualityScore::FULL_PENALTY,
            (None, false, false) => QualityScore::ZERO,
        }
    }

    /// Full decision-to-award path: effective score, then award math.
    pub fn award_for_decision(
        base_points: Decimal,
        score: Option<QualityScore>,
        approved: bool,
        chore_is_required: bool,
    ) -> (QualityScore, Decimal) {
        let effective = Self::effective_score(score, approved, chore_is_required);
        (effective, Self::compute_award(base_points, effective))
    }
}

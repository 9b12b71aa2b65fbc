//! Allowance budget recommendations.
//!
//! Pure analytics over a family's weekly stretch budget; nothing here touches
//! the store or mutates balances.

use chorebank_domain::{ChoreFrequency, ChorePriority};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, Result};

/// One chore as seen by the budget calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreBudgetInput {
    pub name: String,
    pub frequency: ChoreFrequency,
    pub assignee_count: u32,
    pub priority: ChorePriority,
}

impl ChoreBudgetInput {
    /// Weekly instances this chore contributes: occurrences × assignees.
    fn weekly_instances(&self) -> u64 {
        self.frequency.weekly_occurrences() as u64 * self.assignee_count as u64
    }
}

/// Recommended point value for one chore.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowanceRecommendation {
    pub name: String,
    pub weekly_occurrences: u32,
    pub assignee_count: u32,
    pub priority: ChorePriority,
    pub recommended_points: Decimal,
}

/// Full recommendation set for a stretch budget.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowancePlan {
    pub stretch_budget: Decimal,
    /// Unweighted budget share of a single chore instance.
    pub base_value_per_instance: Decimal,
    pub recommendations: Vec<AllowanceRecommendation>,
    /// Σ(recommended × occurrences × assignees) after priority weighting.
    pub projected_weekly_total: Decimal,
    /// Priority weighting can push the projection past the budget; the plan
    /// only flags it, it never clamps.
    pub is_within_budget: bool,
}

/// Stateless allowance math.
pub struct AllowanceService;

impl AllowanceService {
    /// Recommends per-chore point values for a weekly stretch budget.
    pub fn recommend(
        stretch_budget: Decimal,
        chores: &[ChoreBudgetInput],
    ) -> Result<AllowancePlan> {
        if stretch_budget < Decimal::ZERO {
            return Err(CoreError::Validation(
                "stretch budget must not be negative".into(),
            ));
        }
        let total_instances: u64 = chores.iter().map(ChoreBudgetInput::weekly_instances).sum();
        if total_instances == 0 {
            return Err(CoreError::Validation(
                "no weekly chore instances to distribute the budget over".into(),
            ));
        }

        let base_value = stretch_budget / Decimal::from(total_instances);
        let mut projected = Decimal::ZERO;
        let recommendations = chores
            .iter()
            .map(|chore| {
                let recommended = (base_value * chore.priority.multiplier())
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                projected += recommended * Decimal::from(chore.weekly_instances());
                AllowanceRecommendation {
                    name: chore.name.clone(),
                    weekly_occurrences: chore.frequency.weekly_occurrences(),
                    assignee_count: chore.assignee_count,
                    priority: chore.priority,
                    recommended_points: recommended,
                }
            })
            .collect();

        Ok(AllowancePlan {
            stretch_budget,
            base_value_per_instance: base_value,
            recommendations,
            projected_weekly_total: projected,
            is_within_budget: projected <= stretch_budget,
        })
    }
}

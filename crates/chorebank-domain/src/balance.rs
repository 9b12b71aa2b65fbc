//! Per-user point balance counters and the delta shape that mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four durable counters kept for every user.
///
/// `lifetime_points` is monotonically non-decreasing: it grows with positive
/// award deltas and ignores corrections that reduce the available balance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointBalance {
    pub available_points: Decimal,
    pub lifetime_points: Decimal,
    pub banked_points: Decimal,
    pub banked_money: Decimal,
}

impl PointBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a delta to all four counters in one step.
    pub fn apply(&mut self, delta: &BalanceDelta) {
        self.available_points += delta.available;
        self.lifetime_points += delta.lifetime;
        self.banked_points += delta.banked_points;
        self.banked_money += delta.banked_money;
    }
}

/// A signed adjustment to a [`PointBalance`].
///
/// This is the only shape ever applied to balance counters; the constructors
/// encode the legal mutations so call sites cannot mix counters up.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceDelta {
    pub available: Decimal,
    pub lifetime: Decimal,
    pub banked_points: Decimal,
    pub banked_money: Decimal,
}

impl BalanceDelta {
    /// Reconciliation delta for an award: available moves by the signed
    /// amount, lifetime only by its positive part.
    pub fn award(delta: Decimal) -> Self {
        Self {
            available: delta,
            lifetime: delta.max(Decimal::ZERO),
            ..Self::default()
        }
    }

    /// Reserves points for a pending banking request.
    pub fn reserve(amount: Decimal) -> Self {
        Self {
            available: -amount,
            ..Self::default()
        }
    }

    /// Reverses a reservation after a denied banking request.
    pub fn release(amount: Decimal) -> Self {
        Self {
            available: amount,
            ..Self::default()
        }
    }

    /// Commits reserved points into the banked counters.
    pub fn bank(amount: Decimal, money_value: Decimal) -> Self {
        Self {
            banked_points: amount,
            banked_money: money_value,
            ..Self::default()
        }
    }
}

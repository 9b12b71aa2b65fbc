//! Family configuration and membership records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, Role};

/// Family-level configuration consumed by the ledger.
///
/// The ledger reads this; it never writes it. `points_to_money_rate` is the
/// conversion captured by banking requests, `stretch_budget` feeds the
/// allowance calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub points_to_money_rate: Decimal,
    pub auto_approve_chores: bool,
    pub stretch_budget: Decimal,
}

impl Family {
    pub fn new(name: impl Into<String>, points_to_money_rate: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            points_to_money_rate,
            auto_approve_chores: false,
            stretch_budget: Decimal::ZERO,
        }
    }

    pub fn with_auto_approve(mut self, auto_approve: bool) -> Self {
        self.auto_approve_chores = auto_approve;
        self
    }

    pub fn with_stretch_budget(mut self, budget: Decimal) -> Self {
        self.stretch_budget = budget;
        self
    }
}

impl Identifiable for Family {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Binds a user to a family with a role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyMember {
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
}

impl FamilyMember {
    pub fn new(family_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            family_id,
            user_id,
            role,
        }
    }
}

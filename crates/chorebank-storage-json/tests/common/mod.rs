#![allow(dead_code)]

use std::sync::Arc;

use chorebank_core::{
    ApprovalService, BankingService, Clock, FixedClock, SubmissionService,
};
use chorebank_domain::{
    Chore, ChoreAssignment, Family, FamilyMember, PointBalance, Principal, Role,
};
use chorebank_storage_json::MemoryLedgerStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Calendar day used by the fixtures; a Wednesday, so the seeded assignment
/// week (Monday-anchored) covers it.
pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

pub fn test_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_ymd(2024, 3, 13))
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// One seeded family: a parent, a child, and a single assigned chore.
pub struct Fixture {
    pub store: Arc<MemoryLedgerStore>,
    pub family_id: Uuid,
    pub parent: Principal,
    pub child: Principal,
    pub chore_id: Uuid,
    pub assignment_id: Uuid,
}

pub struct FixtureOptions {
    pub rate: Decimal,
    pub auto_approve: bool,
    pub chore_points: Decimal,
    pub chore_required: bool,
    /// When false the family is seeded with the child only.
    pub with_parent: bool,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            rate: Decimal::new(10, 2),
            auto_approve: false,
            chore_points: Decimal::from(10),
            chore_required: false,
            with_parent: true,
        }
    }
}

pub fn build_fixture(options: FixtureOptions) -> Fixture {
    let store = Arc::new(MemoryLedgerStore::new());
    let parent_id = Uuid::new_v4();
    let child_id = Uuid::new_v4();
    let mut family = Family::new("Testers", options.rate).with_auto_approve(options.auto_approve);
    family.stretch_budget = Decimal::from(100);
    let family_id = family.id;

    let mut chore = Chore::new(family_id, "dishes", options.chore_points);
    if options.chore_required {
        chore = chore.required();
    }
    let chore_id = chore.id;
    let assignment = ChoreAssignment::new(chore_id, child_id, test_day());
    let assignment_id = assignment.id;

    store
        .seed(|state| {
            state.add_family(family);
            if options.with_parent {
                state.add_member(FamilyMember::new(family_id, parent_id, Role::Parent));
            }
            state.add_member(FamilyMember::new(family_id, child_id, Role::Child));
            state.add_chore(chore);
            state.add_assignment(assignment);
        })
        .expect("seed fixture state");

    Fixture {
        store,
        family_id,
        parent: Principal::new(parent_id, Role::Parent, family_id),
        child: Principal::new(child_id, Role::Child, family_id),
        chore_id,
        assignment_id,
    }
}

pub fn default_fixture() -> Fixture {
    build_fixture(FixtureOptions::default())
}

impl Fixture {
    pub fn submissions(&self) -> SubmissionService<MemoryLedgerStore> {
        SubmissionService::new(self.store.clone()).with_clock(test_clock())
    }

    pub fn approvals(&self) -> ApprovalService<MemoryLedgerStore> {
        ApprovalService::new(self.store.clone()).with_clock(test_clock())
    }

    pub fn banking(&self) -> BankingService<MemoryLedgerStore> {
        BankingService::new(self.store.clone()).with_clock(test_clock())
    }

    pub fn balance(&self, user_id: Uuid) -> PointBalance {
        self.store
            .snapshot()
            .expect("snapshot store")
            .balances
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn give_points(&self, user_id: Uuid, available: Decimal) {
        self.store
            .seed(|state| {
                state.set_balance(
                    user_id,
                    PointBalance {
                        available_points: available,
                        lifetime_points: available,
                        ..PointBalance::default()
                    },
                );
            })
            .expect("seed balance");
    }
}

//! In-memory ledger state and its repository implementations.

use std::collections::HashMap;

use chorebank_core::{
    ApprovalRepository, BalanceRepository, BankingRepository, ChoreRepository, CoreError,
    FamilyRepository, Result, SubmissionRepository,
};
use chorebank_domain::{
    BalanceDelta, Chore, ChoreApproval, ChoreAssignment, ChoreSubmission, Family, FamilyMember,
    PointBalance, PointTransaction, Role, SubmissionStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Complete ledger snapshot: the unit of transaction, persistence, and test
/// seeding. Collections stay public so fixtures can build state directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    pub families: Vec<Family>,
    pub members: Vec<FamilyMember>,
    pub chores: Vec<Chore>,
    pub assignments: Vec<ChoreAssignment>,
    pub submissions: Vec<ChoreSubmission>,
    pub approvals: Vec<ChoreApproval>,
    pub transactions: Vec<PointTransaction>,
    pub balances: HashMap<Uuid, PointBalance>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_family(&mut self, family: Family) -> Uuid {
        let id = family.id;
        self.families.push(family);
        id
    }

    pub fn add_member(&mut self, member: FamilyMember) {
        self.members.push(member);
    }

    pub fn add_chore(&mut self, chore: Chore) -> Uuid {
        let id = chore.id;
        self.chores.push(chore);
        id
    }

    pub fn add_assignment(&mut self, assignment: ChoreAssignment) -> Uuid {
        let id = assignment.id;
        self.assignments.push(assignment);
        id
    }

    pub fn set_balance(&mut self, user_id: Uuid, balance: PointBalance) {
        self.balances.insert(user_id, balance);
    }

    pub fn family_mut(&mut self, family_id: Uuid) -> Option<&mut Family> {
        self.families.iter_mut().find(|f| f.id == family_id)
    }
}

impl BalanceRepository for LedgerState {
    fn balance(&self, user_id: Uuid) -> Result<PointBalance> {
        Ok(self.balances.get(&user_id).copied().unwrap_or_default())
    }

    fn apply_balance_delta(&mut self, user_id: Uuid, delta: &BalanceDelta) -> Result<PointBalance> {
        let balance = self.balances.entry(user_id).or_default();
        balance.apply(delta);
        Ok(*balance)
    }
}

impl FamilyRepository for LedgerState {
    fn family(&self, family_id: Uuid) -> Result<Family> {
        self.families
            .iter()
            .find(|f| f.id == family_id)
            .cloned()
            .ok_or(CoreError::FamilyNotFound(family_id))
    }

    fn member_role(&self, family_id: Uuid, user_id: Uuid) -> Result<Option<Role>> {
        Ok(self
            .members
            .iter()
            .find(|m| m.family_id == family_id && m.user_id == user_id)
            .map(|m| m.role))
    }

    fn first_parent(&self, family_id: Uuid) -> Result<Option<Uuid>> {
        Ok(self
            .members
            .iter()
            .find(|m| m.family_id == family_id && matches!(m.role, Role::Parent))
            .map(|m| m.user_id))
    }
}

impl ChoreRepository for LedgerState {
    fn chore(&self, chore_id: Uuid) -> Result<Chore> {
        self.chores
            .iter()
            .find(|c| c.id == chore_id)
            .cloned()
            .ok_or(CoreError::ChoreNotFound(chore_id))
    }

    fn assignment(&self, assignment_id: Uuid) -> Result<Option<ChoreAssignment>> {
        Ok(self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .copied())
    }
}

impl SubmissionRepository for LedgerState {
    fn submission(&self, submission_id: Uuid) -> Result<Option<ChoreSubmission>> {
        Ok(self
            .submissions
            .iter()
            .find(|s| s.id == submission_id)
            .cloned())
    }

    fn submission_for_day(
        &self,
        assignment_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<ChoreSubmission>> {
        Ok(self
            .submissions
            .iter()
            .find(|s| s.assignment_id == assignment_id && s.day == day)
            .cloned())
    }

    fn insert_submission(&mut self, submission: ChoreSubmission) -> Result<()> {
        // Uniqueness on (assignment, day) is the idempotency anchor for
        // caller retries; enforce it here as well as in the service guard.
        if self
            .submissions
            .iter()
            .any(|s| s.assignment_id == submission.assignment_id && s.day == submission.day)
        {
            return Err(CoreError::Conflict(format!(
                "submission already exists for assignment {} on {}",
                submission.assignment_id, submission.day
            )));
        }
        self.submissions.push(submission);
        Ok(())
    }

    fn update_submission(&mut self, submission: &ChoreSubmission) -> Result<()> {
        match self.submissions.iter_mut().find(|s| s.id == submission.id) {
            Some(row) => {
                *row = submission.clone();
                Ok(())
            }
            None => Err(CoreError::SubmissionNotFound(submission.id)),
        }
    }

    fn pending_for_family(&self, family_id: Uuid) -> Result<Vec<ChoreSubmission>> {
        let family_chores: Vec<Uuid> = self
            .chores
            .iter()
            .filter(|c| c.family_id == family_id)
            .map(|c| c.id)
            .collect();
        Ok(self
            .submissions
            .iter()
            .filter(|s| {
                s.status == SubmissionStatus::Pending
                    && self
                        .assignments
                        .iter()
                        .any(|a| a.id == s.assignment_id && family_chores.contains(&a.chore_id))
            })
            .cloned()
            .collect())
    }
}

impl ApprovalRepository for LedgerState {
    fn approval_for_submission(&self, submission_id: Uuid) -> Result<Option<ChoreApproval>> {
        Ok(self
            .approvals
            .iter()
            .find(|a| a.submission_id == submission_id)
            .cloned())
    }

    fn upsert_approval(&mut self, approval: ChoreApproval) -> Result<()> {
        match self
            .approvals
            .iter_mut()
            .find(|a| a.submission_id == approval.submission_id)
        {
            Some(row) => *row = approval,
            None => self.approvals.push(approval),
        }
        Ok(())
    }
}

impl BankingRepository for LedgerState {
    fn point_transaction(&self, id: Uuid) -> Result<Option<PointTransaction>> {
        Ok(self.transactions.iter().find(|t| t.id == id).cloned())
    }

    fn insert_point_transaction(&mut self, txn: PointTransaction) -> Result<()> {
        self.transactions.push(txn);
        Ok(())
    }

    fn update_point_transaction(&mut self, txn: &PointTransaction) -> Result<()> {
        match self.transactions.iter_mut().find(|t| t.id == txn.id) {
            Some(row) => {
                *row = txn.clone();
                Ok(())
            }
            None => Err(CoreError::TransactionNotFound(txn.id)),
        }
    }

    fn transactions_for_user(&self, user_id: Uuid) -> Result<Vec<PointTransaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }
}

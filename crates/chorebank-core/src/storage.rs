//! Repository contracts for the durable ledger store.
//!
//! Services never touch storage directly; they receive a [`LedgerStore`] and
//! run each operation inside one `transact` call. An `Err` from the closure
//! must roll the whole transaction back — balances and rows together.

use chrono::NaiveDate;
use chorebank_domain::{
    BalanceDelta, Chore, ChoreApproval, ChoreAssignment, ChoreSubmission, Family, PointBalance,
    PointTransaction, Role,
};
use uuid::Uuid;

use crate::error::Result;

/// Read/write access to the per-user balance counters.
///
/// Balances are created lazily: unknown users read as all-zero.
pub trait BalanceRepository {
    fn balance(&self, user_id: Uuid) -> Result<PointBalance>;
    fn apply_balance_delta(&mut self, user_id: Uuid, delta: &BalanceDelta) -> Result<PointBalance>;
}

/// Read-only family configuration and membership lookups.
pub trait FamilyRepository {
    fn family(&self, family_id: Uuid) -> Result<Family>;
    fn member_role(&self, family_id: Uuid, user_id: Uuid) -> Result<Option<Role>>;
    /// First parent member of the family, used to attribute auto-approvals.
    fn first_parent(&self, family_id: Uuid) -> Result<Option<Uuid>>;
}

/// Chore definitions and week-bucketed assignments.
pub trait ChoreRepository {
    fn chore(&self, chore_id: Uuid) -> Result<Chore>;
    fn assignment(&self, assignment_id: Uuid) -> Result<Option<ChoreAssignment>>;
}

/// Submission rows, unique per (assignment, calendar day).
pub trait SubmissionRepository {
    fn submission(&self, submission_id: Uuid) -> Result<Option<ChoreSubmission>>;
    fn submission_for_day(
        &self,
        assignment_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<ChoreSubmission>>;
    fn insert_submission(&mut self, submission: ChoreSubmission) -> Result<()>;
    fn update_submission(&mut self, submission: &ChoreSubmission) -> Result<()>;
    fn pending_for_family(&self, family_id: Uuid) -> Result<Vec<ChoreSubmission>>;
}

/// Approval rows, unique per submission.
pub trait ApprovalRepository {
    fn approval_for_submission(&self, submission_id: Uuid) -> Result<Option<ChoreApproval>>;
    /// Creates the row if absent, replaces it in place if present. Never
    /// yields a second row for the same submission.
    fn upsert_approval(&mut self, approval: ChoreApproval) -> Result<()>;
}

/// Append-mostly banking ledger rows.
pub trait BankingRepository {
    fn point_transaction(&self, id: Uuid) -> Result<Option<PointTransaction>>;
    fn insert_point_transaction(&mut self, txn: PointTransaction) -> Result<()>;
    fn update_point_transaction(&mut self, txn: &PointTransaction) -> Result<()>;
    fn transactions_for_user(&self, user_id: Uuid) -> Result<Vec<PointTransaction>>;
}

/// Everything a ledger operation may touch within one transaction.
pub trait LedgerTx:
    BalanceRepository
    + FamilyRepository
    + ChoreRepository
    + SubmissionRepository
    + ApprovalRepository
    + BankingRepository
{
}

impl<T> LedgerTx for T where
    T: BalanceRepository
        + FamilyRepository
        + ChoreRepository
        + SubmissionRepository
        + ApprovalRepository
        + BankingRepository
{
}

/// Abstraction over transactional persistence backends.
///
/// Implementations serialize transactions: the closure observes current state
/// (re-reading rows inside the closure is therefore race-free), and its `Err`
/// return discards every mutation made through the `LedgerTx`.
pub trait LedgerStore: Send + Sync {
    fn transact<T>(&self, op: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T>;
}

//! Submission creation and the auto-approval fast path.

use std::sync::Arc;

use chrono::NaiveDate;
use chorebank_domain::{ChoreSubmission, Principal, QualityScore, SubmissionStatus};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::notify::{LedgerEvent, NotificationDispatcher, NullNotifier};
use crate::reconcile::{reconcile_approval, ApprovalDecision, ApprovalOutcome};
use crate::storage::LedgerStore;
use crate::time::{Clock, SystemClock};

/// Boundary input for creating a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitChoreInput {
    pub assignment_id: Uuid,
    /// Calendar day the chore was completed on.
    pub day: NaiveDate,
}

/// Result of a submission attempt. `awarded` is set only when the family's
/// auto-approve policy paid out in the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub submission: ChoreSubmission,
    pub awarded: Option<ApprovalOutcome>,
}

/// Child-facing submission state machine.
pub struct SubmissionService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl<S: LedgerStore> SubmissionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(NullNotifier),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Records one completion attempt for the acting child.
    ///
    /// Guards: the assignment must exist and belong to the principal, the
    /// chore must be in the principal's family, and no submission may already
    /// exist for the same (assignment, day) — duplicates surface as
    /// [`CoreError::Conflict`], never a silent merge.
    pub fn submit(&self, principal: &Principal, input: SubmitChoreInput) -> Result<SubmissionReceipt> {
        if !principal.is_child() {
            return Err(CoreError::Forbidden);
        }
        let now = self.clock.now();
        let user_id = principal.user_id;
        let family_id = principal.family_id;

        let receipt = self.store.transact(|tx| {
            let assignment = tx
                .assignment(input.assignment_id)?
                .ok_or(CoreError::AssignmentNotFound(input.assignment_id))?;
            if assignment.user_id != user_id {
                return Err(CoreError::Forbidden);
            }
            let chore = tx.chore(assignment.chore_id)?;
            if chore.family_id != family_id {
                return Err(CoreError::Forbidden);
            }
            if tx.submission_for_day(assignment.id, input.day)?.is_some() {
                return Err(CoreError::Conflict(format!(
                    "submission already exists for assignment {} on {}",
                    assignment.id, input.day
                )));
            }

            let mut submission = ChoreSubmission::new(assignment.id, user_id, input.day, now);
            let family = tx.family(chore.family_id)?;
            if !family.auto_approve_chores {
                tx.insert_submission(submission.clone())?;
                return Ok(SubmissionReceipt {
                    submission,
                    awarded: None,
                });
            }

            // Auto-approval still needs a parent identity on the approval row.
            let approver = tx.first_parent(family.id)?.ok_or_else(|| {
                CoreError::Validation(
                    "family has no parent member to attribute auto-approval".into(),
                )
            })?;
            submission.status = SubmissionStatus::AutoApproved;
            tx.insert_submission(submission.clone())?;
            let decision = ApprovalDecision::approve(Some(QualityScore::FULL));
            let outcome = reconcile_approval(
                tx,
                &submission,
                &chore,
                approver,
                &decision,
                SubmissionStatus::AutoApproved,
                now,
            )?;
            let stored = tx
                .submission(submission.id)?
                .ok_or(CoreError::SubmissionNotFound(submission.id))?;
            Ok(SubmissionReceipt {
                submission: stored,
                awarded: Some(outcome),
            })
        })?;

        tracing::info!(
            submission = %receipt.submission.id,
            status = %receipt.submission.status,
            "submission created"
        );
        self.notifier.dispatch(&LedgerEvent::SubmissionCreated {
            submission_id: receipt.submission.id,
            user_id,
            auto_approved: receipt.awarded.is_some(),
        });
        Ok(receipt)
    }

    /// Review queue for the acting parent's family, oldest first.
    pub fn pending_for_family(&self, principal: &Principal) -> Result<Vec<ChoreSubmission>> {
        if !principal.is_parent() {
            return Err(CoreError::Forbidden);
        }
        let family_id = principal.family_id;
        self.store.transact(|tx| {
            let mut pending = tx.pending_for_family(family_id)?;
            pending.sort_by_key(|s| s.completed_at);
            Ok(pending)
        })
    }
}

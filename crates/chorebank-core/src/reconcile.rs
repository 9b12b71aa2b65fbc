//! Approval reconciliation: the single re-scoring state transition.
//!
//! Scoring the same submission twice must never double-award points. All call
//! sites — parent review, parent re-score, auto-approval — route through
//! [`reconcile_approval`], which applies only the delta between the freshly
//! computed award and the previously recorded one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chorebank_domain::{
    BalanceDelta, Chore, ChoreApproval, ChoreSubmission, Principal, QualityScore, SubmissionStatus,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::notify::{LedgerEvent, NotificationDispatcher, NullNotifier};
use crate::scoring::ScoringEngine;
use crate::storage::{LedgerStore, LedgerTx};
use crate::time::{Clock, SystemClock};

/// A validated scoring decision. Construct via [`ApprovalDecision::approve`],
/// [`ApprovalDecision::deny`], or [`ApprovalDecision::from_raw`] at the
/// request boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalDecision {
    pub approved: bool,
    pub score: Option<QualityScore>,
    pub feedback: Option<String>,
}

impl ApprovalDecision {
    pub fn approve(score: Option<QualityScore>) -> Self {
        Self {
            approved: true,
            score,
            feedback: None,
        }
    }

    pub fn deny(score: Option<QualityScore>) -> Self {
        Self {
            approved: false,
            score,
            feedback: None,
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Validates an untrusted request body into a decision. Rejects scores
    /// outside −100..150 before any transaction opens.
    pub fn from_raw(approved: bool, score: Option<i16>, feedback: Option<String>) -> Result<Self> {
        let score = score.map(QualityScore::new).transpose()?;
        Ok(Self {
            approved,
            score,
            feedback,
        })
    }
}

/// What a reconciliation changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprovalOutcome {
    pub submission_id: Uuid,
    /// Child whose balance the reconciliation settled.
    pub user_id: Uuid,
    pub status: SubmissionStatus,
    pub effective_score: QualityScore,
    pub points_awarded: Decimal,
    pub previous_points: Decimal,
    /// The only quantity ever applied to the available balance.
    pub delta: Decimal,
}

/// Parent-facing scoring and re-scoring of submissions.
pub struct ApprovalService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl<S: LedgerStore> ApprovalService<S> {
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

    /// Scores or re-scores a submission and settles the balance delta, all
    /// inside one store transaction.
    pub fn score_submission(
        &self,
        principal: &Principal,
        submission_id: Uuid,
        decision: ApprovalDecision,
    ) -> Result<ApprovalOutcome> {
        if !principal.is_parent() {
            return Err(CoreError::Forbidden);
        }
        let now = self.clock.now();
        let family_id = principal.family_id;
        let approver = principal.user_id;

        let outcome = self.store.transact(|tx| {
            let submission = tx
                .submission(submission_id)?
                .ok_or(CoreError::SubmissionNotFound(submission_id))?;
            let assignment = tx
                .assignment(submission.assignment_id)?
                .ok_or(CoreError::AssignmentNotFound(submission.assignment_id))?;
            let chore = tx.chore(assignment.chore_id)?;
            if chore.family_id != family_id {
                return Err(CoreError::Forbidden);
            }
            let status = if decision.approved {
                SubmissionStatus::Approved
            } else {
                SubmissionStatus::Denied
            };
            reconcile_approval(tx, &submission, &chore, approver, &decision, status, now)
        })?;

        tracing::info!(
            submission = %submission_id,
            status = %outcome.status,
            delta = %outcome.delta,
            "submission scored"
        );
        self.notifier.dispatch(&LedgerEvent::SubmissionScored {
            submission_id,
            user_id: outcome.user_id,
            approved: decision.approved,
            points_awarded: outcome.points_awarded,
            delta: outcome.delta,
        });
        Ok(outcome)
    }
}

/// Applies one scoring decision within an open transaction.
///
/// Re-reads the current approval row from `tx` (never a stale caller copy),
/// so concurrent re-scores settle last-write-wins without lost updates.
pub fn reconcile_approval(
    tx: &mut dyn LedgerTx,
    submission: &ChoreSubmission,
    chore: &Chore,
    approver: Uuid,
    decision: &ApprovalDecision,
    status: SubmissionStatus,
    now: DateTime<Utc>,
) -> Result<ApprovalOutcome> {
    let existing = tx.approval_for_submission(submission.id)?;
    let previous_points = existing
        .as_ref()
        .map(|row| row.points_awarded)
        .unwrap_or(Decimal::ZERO);

    let (effective, new_points) = ScoringEngine::award_for_decision(
        chore.points,
        decision.score,
        decision.approved,
        chore.is_required,
    );
    let delta = new_points - previous_points;

    tx.apply_balance_delta(submission.user_id, &BalanceDelta::award(delta))?;

    let approval = match existing {
        Some(mut row) => {
            row.rescore(
                approver,
                decision.approved,
                effective.value(),
                new_points,
                chore.points,
                decision.feedback.clone(),
                now,
            );
            row
        }
        None => ChoreApproval::new(
            submission.id,
            approver,
            decision.approved,
            effective.value(),
            new_points,
            chore.points,
            decision.feedback.clone(),
            now,
        ),
    };
    tx.upsert_approval(approval)?;

    let mut updated = submission.clone();
    updated.record_decision(status, effective.value(), new_points);
    tx.update_submission(&updated)?;

    Ok(ApprovalOutcome {
        submission_id: submission.id,
        user_id: submission.user_id,
        status,
        effective_score: effective,
        points_awarded: new_points,
        previous_points,
        delta,
    })
}

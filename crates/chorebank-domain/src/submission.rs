//! Chore submissions and their 1:1 approval records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Lifecycle state of a single completion attempt.
///
/// `AutoApproved` is assigned at creation when the family skips review; the
/// terminal states remain re-scorable through the reconciliation path.
pub enum SubmissionStatus {
    Pending,
    AutoApproved,
    Approved,
    Denied,
}

impl SubmissionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::AutoApproved => "Auto-Approved",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Denied => "Denied",
        };
        f.write_str(label)
    }
}

/// One attempt at completing an assignment on a calendar day.
///
/// Unique per (assignment, day). `score` and `points_awarded` are
/// denormalized copies of the latest approval for fast reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoreSubmission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub status: SubmissionStatus,
    pub score: Option<i16>,
    pub points_awarded: Decimal,
    pub completed_at: DateTime<Utc>,
}

impl ChoreSubmission {
    pub fn new(
        assignment_id: Uuid,
        user_id: Uuid,
        day: NaiveDate,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id,
            user_id,
            day,
            status: SubmissionStatus::Pending,
            score: None,
            points_awarded: Decimal::ZERO,
            completed_at,
        }
    }

    /// Mirrors the outcome of a reconciliation onto the submission row.
    pub fn record_decision(&mut self, status: SubmissionStatus, score: i16, points: Decimal) {
        self.status = status;
        self.score = Some(score);
        self.points_awarded = points;
    }
}

impl Identifiable for ChoreSubmission {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for ChoreSubmission {
    fn display_label(&self) -> String {
        format!("submission:{} [{}]", self.id, self.status)
    }
}

/// The scoring record for a submission, upserted on every re-score.
///
/// Exactly one row exists per submission. `original_points` freezes the
/// chore's base value at scoring time for audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoreApproval {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub approved_by: Uuid,
    pub approved: bool,
    pub score: i16,
    pub points_awarded: Decimal,
    pub original_points: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChoreApproval {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        submission_id: Uuid,
        approved_by: Uuid,
        approved: bool,
        score: i16,
        points_awarded: Decimal,
        original_points: Decimal,
        feedback: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            submission_id,
            approved_by,
            approved,
            score,
            points_awarded,
            original_points,
            feedback,
            created_at: at,
            updated_at: at,
        }
    }

    /// Updates this record in place for a re-score; identity and creation
    /// time survive so the row stays 1:1 with its submission.
    #[allow(clippy::too_many_arguments)]
    pub fn rescore(
        &mut self,
        approved_by: Uuid,
        approved: bool,
        score: i16,
        points_awarded: Decimal,
        original_points: Decimal,
        feedback: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.approved_by = approved_by;
        self.approved = approved;
        self.score = score;
        self.points_awarded = points_awarded;
        self.original_points = original_points;
        if feedback.is_some() {
            self.feedback = feedback;
        }
        self.updated_at = at;
    }
}

impl Identifiable for ChoreApproval {
    fn id(&self) -> Uuid {
        self.id
    }
}

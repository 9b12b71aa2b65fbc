//! Append-only ledger rows for the points-to-money banking workflow.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// What kind of banking operation a ledger row records.
pub enum PointTransactionKind {
    BankingRequest,
    BankingApproved,
    BankingDenied,
}

impl fmt::Display for PointTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PointTransactionKind::BankingRequest => "Banking Request",
            PointTransactionKind::BankingApproved => "Banking Approved",
            PointTransactionKind::BankingDenied => "Banking Denied",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Resolution state of a banking row. Distinct from [`super::SubmissionStatus`].
pub enum PointTransactionStatus {
    Pending,
    Approved,
    Denied,
    Completed,
}

impl fmt::Display for PointTransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PointTransactionStatus::Pending => "Pending",
            PointTransactionStatus::Approved => "Approved",
            PointTransactionStatus::Denied => "Denied",
            PointTransactionStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// One row in the banking ledger.
///
/// A request reserves points immediately; `rate` and `money_value` are frozen
/// at request time so later family rate changes never alter pending requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub family_id: Uuid,
    pub kind: PointTransactionKind,
    pub status: PointTransactionStatus,
    pub amount: Decimal,
    pub money_value: Decimal,
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl PointTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn request(
        user_id: Uuid,
        family_id: Uuid,
        amount: Decimal,
        money_value: Decimal,
        rate: Decimal,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            family_id,
            kind: PointTransactionKind::BankingRequest,
            status: PointTransactionStatus::Pending,
            amount,
            money_value,
            rate,
            note,
            created_at: at,
            resolved_by: None,
            resolved_at: None,
        }
    }

    pub fn resolve_approved(&mut self, by: Uuid, at: DateTime<Utc>) {
        self.kind = PointTransactionKind::BankingApproved;
        self.status = PointTransactionStatus::Approved;
        self.resolved_by = Some(by);
        self.resolved_at = Some(at);
    }

    pub fn resolve_denied(&mut self, by: Uuid, at: DateTime<Utc>) {
        self.kind = PointTransactionKind::BankingDenied;
        self.status = PointTransactionStatus::Denied;
        self.resolved_by = Some(by);
        self.resolved_at = Some(at);
    }

    /// Audit row appended when a request is approved. The negated amount
    /// shows the money-for-points conversion in history listings.
    pub fn audit_completed(source: &PointTransaction, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: source.user_id,
            family_id: source.family_id,
            kind: PointTransactionKind::BankingApproved,
            status: PointTransactionStatus::Completed,
            amount: -source.amount,
            money_value: source.money_value,
            rate: source.rate,
            note: source.note.clone(),
            created_at: at,
            resolved_by: source.resolved_by,
            resolved_at: source.resolved_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, PointTransactionStatus::Pending)
    }
}

impl Identifiable for PointTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for PointTransaction {
    fn display_label(&self) -> String {
        format!("{}: {} pts [{}]", self.kind, self.amount, self.status)
    }
}

use std::result::Result as StdResult;

use chorebank_domain::ScoreRangeError;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for ledger operations.
///
/// Every balance-mutating error aborts the enclosing store transaction;
/// nothing is ever partially committed.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Submission not found: {0}")]
    SubmissionNotFound(Uuid),
    #[error("Assignment not found: {0}")]
    AssignmentNotFound(Uuid),
    #[error("Chore not found: {0}")]
    ChoreNotFound(Uuid),
    #[error("Family not found: {0}")]
    FamilyNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    /// Deliberately carries no detail so callers cannot learn whether the
    /// target resource exists.
    #[error("Not permitted")]
    Forbidden,
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shortfall carried by an [`CoreError::InsufficientBalance`] error.
    pub fn shortfall(&self) -> Option<Decimal> {
        match self {
            CoreError::InsufficientBalance {
                requested,
                available,
            } => Some(requested - available),
            _ => None,
        }
    }
}

impl From<ScoreRangeError> for CoreError {
    fn from(err: ScoreRangeError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

pub type Result<T> = StdResult<T, CoreError>;

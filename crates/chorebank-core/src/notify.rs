//! Fire-and-forget notification dispatch.
//!
//! Delivery is an external collaborator: ledger operations commit or fail on
//! their own, and dispatch happens only after a successful commit.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Events emitted after a ledger transaction commits.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    SubmissionCreated {
        submission_id: Uuid,
        user_id: Uuid,
        auto_approved: bool,
    },
    SubmissionScored {
        submission_id: Uuid,
        user_id: Uuid,
        approved: bool,
        points_awarded: Decimal,
        delta: Decimal,
    },
    BankingRequested {
        transaction_id: Uuid,
        user_id: Uuid,
        amount: Decimal,
        money_value: Decimal,
    },
    BankingResolved {
        transaction_id: Uuid,
        user_id: Uuid,
        approved: bool,
        amount: Decimal,
    },
}

/// Sink for ledger events. Implementations must not fail; anything that can
/// go wrong stays on the dispatcher's side of the fence.
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, event: &LedgerEvent);
}

/// Drops every event. Default for services constructed without a dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl NotificationDispatcher for NullNotifier {
    fn dispatch(&self, _event: &LedgerEvent) {}
}

/// Emits events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationDispatcher for LogNotifier {
    fn dispatch(&self, event: &LedgerEvent) {
        tracing::info!(?event, "ledger event");
    }
}

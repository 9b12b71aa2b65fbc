//! Two-phase banking workflow: reserve on request, commit on approval,
//! reverse on denial.

use std::sync::Arc;

use chorebank_domain::{BalanceDelta, PointBalance, PointTransaction, Principal};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::notify::{LedgerEvent, NotificationDispatcher, NullNotifier};
use crate::storage::{LedgerStore, LedgerTx};
use crate::time::{Clock, SystemClock};

/// Boundary input for a banking request.
#[derive(Debug, Clone, PartialEq)]
pub struct BankingRequestInput {
    pub amount: Decimal,
    pub note: Option<String>,
}

impl BankingRequestInput {
    pub fn new(amount: Decimal) -> Self {
        Self { amount, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "banking amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Child-initiated, parent-resolved conversion of points into money.
pub struct BankingService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl<S: LedgerStore> BankingService<S> {
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

    /// Reserves points for banking.
    ///
    /// The conversion rate is captured here, not at approval time; later
    /// family rate changes never retroactively alter pending requests.
    pub fn request(
        &self,
        principal: &Principal,
        input: BankingRequestInput,
    ) -> Result<PointTransaction> {
        if !principal.is_child() {
            return Err(CoreError::Forbidden);
        }
        input.validate()?;
        let now = self.clock.now();
        let user_id = principal.user_id;
        let family_id = principal.family_id;

        let txn = self.store.transact(|tx| {
            let family = tx.family(family_id)?;
            let balance = tx.balance(user_id)?;
            if input.amount > balance.available_points {
                return Err(CoreError::InsufficientBalance {
                    requested: input.amount,
                    available: balance.available_points,
                });
            }
            let money_value = (input.amount * family.points_to_money_rate)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            tx.apply_balance_delta(user_id, &BalanceDelta::reserve(input.amount))?;
            let txn = PointTransaction::request(
                user_id,
                family.id,
                input.amount,
                money_value,
                family.points_to_money_rate,
                input.note.clone(),
                now,
            );
            tx.insert_point_transaction(txn.clone())?;
            Ok(txn)
        })?;

        tracing::info!(
            transaction = %txn.id,
            amount = %txn.amount,
            money = %txn.money_value,
            "banking requested"
        );
        self.notifier.dispatch(&LedgerEvent::BankingRequested {
            transaction_id: txn.id,
            user_id,
            amount: txn.amount,
            money_value: txn.money_value,
        });
        Ok(txn)
    }

    /// Commits a pending request: reserved points become banked points and
    /// money, and a signed audit row lands in the history.
    pub fn approve(&self, principal: &Principal, transaction_id: Uuid) -> Result<PointTransaction> {
        let now = self.clock.now();
        let resolved = self.resolve(principal, transaction_id, |tx, txn| {
            txn.resolve_approved(principal.user_id, now);
            tx.update_point_transaction(txn)?;
            tx.apply_balance_delta(txn.user_id, &BalanceDelta::bank(txn.amount, txn.money_value))?;
            tx.insert_point_transaction(PointTransaction::audit_completed(txn, now))?;
            Ok(())
        })?;
        self.notify_resolution(&resolved, true);
        Ok(resolved)
    }

    /// Denies a pending request and reverses its reservation exactly.
    pub fn deny(&self, principal: &Principal, transaction_id: Uuid) -> Result<PointTransaction> {
        let now = self.clock.now();
        let resolved = self.resolve(principal, transaction_id, |tx, txn| {
            txn.resolve_denied(principal.user_id, now);
            tx.update_point_transaction(txn)?;
            tx.apply_balance_delta(txn.user_id, &BalanceDelta::release(txn.amount))?;
            Ok(())
        })?;
        self.notify_resolution(&resolved, false);
        Ok(resolved)
    }

    /// Shared resolution guards: the row must exist, its child must belong to
    /// the acting parent's family, and it must still be pending.
    fn resolve(
        &self,
        principal: &Principal,
        transaction_id: Uuid,
        apply: impl FnOnce(&mut dyn LedgerTx, &mut PointTransaction) -> Result<()>,
    ) -> Result<PointTransaction> {
        if !principal.is_parent() {
            return Err(CoreError::Forbidden);
        }
        let family_id = principal.family_id;
        self.store.transact(|tx| {
            let mut txn = tx
                .point_transaction(transaction_id)?
                .ok_or(CoreError::TransactionNotFound(transaction_id))?;
            if txn.family_id != family_id
                || tx.member_role(family_id, txn.user_id)?.is_none()
            {
                return Err(CoreError::Forbidden);
            }
            if !txn.is_pending() {
                return Err(CoreError::Conflict(format!(
                    "banking request {} already resolved",
                    txn.id
                )));
            }
            apply(tx, &mut txn)?;
            Ok(txn)
        })
    }

    fn notify_resolution(&self, txn: &PointTransaction, approved: bool) {
        tracing::info!(
            transaction = %txn.id,
            status = %txn.status,
            "banking resolved"
        );
        self.notifier.dispatch(&LedgerEvent::BankingResolved {
            transaction_id: txn.id,
            user_id: txn.user_id,
            approved,
            amount: txn.amount,
        });
    }

    /// Family-scoped history, newest first. Children may only read their own.
    pub fn history(&self, principal: &Principal, user_id: Uuid) -> Result<Vec<PointTransaction>> {
        self.authorize_read(principal, user_id)?;
        self.store.transact(|tx| {
            let mut rows = tx.transactions_for_user(user_id)?;
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        })
    }

    /// Family-scoped read of the four balance counters.
    pub fn balance_of(&self, principal: &Principal, user_id: Uuid) -> Result<PointBalance> {
        self.authorize_read(principal, user_id)?;
        self.store.transact(|tx| tx.balance(user_id))
    }

    fn authorize_read(&self, principal: &Principal, user_id: Uuid) -> Result<()> {
        if principal.is_child() {
            if principal.user_id != user_id {
                return Err(CoreError::Forbidden);
            }
            return Ok(());
        }
        let family_id = principal.family_id;
        self.store.transact(|tx| {
            if tx.member_role(family_id, user_id)?.is_none() {
                return Err(CoreError::Forbidden);
            }
            Ok(())
        })
    }
}

//! Balance/history reconciliation.
//!
//! The stored balance is a materialized cache over the account's completed
//! transaction history, and `balance_after` on each record is recorded at
//! commit time rather than derived. Reconciliation recomputes both from the
//! log and rejects any divergence. This is the core integrity check of the
//! ledger.

use rust_decimal::Decimal;

use crate::account::Account;
use crate::error::LedgerError;
use crate::transaction::{Transaction, TransactionStatus};

/// Signed sum (credits minus debits) over the completed records of a history.
///
/// Pending or failed records never contribute to a balance.
pub fn replay_balance(history: &[Transaction]) -> Decimal {
    history
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
        .map(Transaction::signed_amount)
        .sum()
}

/// Verify that `account.balance` reconciles with `history`.
///
/// `history` is newest-first (the order the transaction log returns) and must
/// be the account's complete history. Two checks:
/// - the signed sum of completed records equals the stored balance
/// - the newest completed record's `balance_after` equals the stored balance
pub fn verify_against_history(account: &Account, history: &[Transaction]) -> Result<(), LedgerError> {
    let computed = replay_balance(history);
    let stored = account.balance;

    if computed != stored.amount() {
        return Err(LedgerError::ReconciliationMismatch { stored, computed });
    }

    let newest_completed = history
        .iter()
        .find(|t| t.status == TransactionStatus::Completed);
    if let Some(txn) = newest_completed {
        if txn.balance_after != stored {
            return Err(LedgerError::ReconciliationMismatch {
                stored,
                computed: txn.balance_after.amount(),
            });
        }
    }

    Ok(())
}

//! Ledger error taxonomy.
//!
//! Every failure a ledger operation can produce has an unambiguous kind that
//! callers can branch on. Validation failures are detected before any
//! mutation; concurrency and persistence failures guarantee no partial state.

use rust_decimal::Decimal;
use thiserror::Error;

use teller_core::{Money, MoneyError};

use crate::account::AccountStatus;

/// Typed failure of a ledger operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The account identifier does not resolve.
    #[error("account not found")]
    AccountNotFound,

    /// Non-positive, wrong precision, or non-numeric amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The account balance does not cover the requested debit.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Mutating operation against a frozen or closed account.
    #[error("account is not active (status: {0})")]
    AccountNotActive(AccountStatus),

    /// Self-transfer or otherwise malformed transfer request.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),

    /// Card lookup failed. Deliberately coarse (no credential oracle).
    #[error("invalid card")]
    InvalidCard,

    /// PIN verification failed. Deliberately coarse.
    #[error("invalid pin")]
    InvalidPin,

    /// Card exists and the PIN matched, but the card is not active.
    #[error("card is not active")]
    CardInactive,

    /// Could not acquire the account's mutation lock within the configured
    /// bound. Retryable; no mutation has started.
    #[error("timed out waiting for account lock")]
    LockTimeout,

    /// The atomic commit was rejected or the backing store failed. The commit
    /// is all-or-nothing, so no partial effect exists.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// The stored balance disagrees with a recomputation from the completed
    /// transaction history.
    #[error("balance does not reconcile with history (stored: {stored}, computed: {computed})")]
    ReconciliationMismatch { stored: Money, computed: Decimal },
}

impl From<MoneyError> for LedgerError {
    fn from(value: MoneyError) -> Self {
        Self::InvalidAmount(value.to_string())
    }
}

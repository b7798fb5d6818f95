//! Ledger domain (single-entry running-balance accounts).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! decision functions here compute what a balance *would become*; applying the
//! result durably (and atomically with the transaction record that justifies
//! it) is the orchestration layer's job.

pub mod account;
pub mod error;
pub mod reconcile;
pub mod transaction;

pub use account::{Account, AccountKind, AccountNumber, AccountStatus, BalanceView};
pub use error::LedgerError;
pub use reconcile::{replay_balance, verify_against_history};
pub use transaction::{
    DateRange, HistoryQuery, Transaction, TransactionCategory, TransactionKind, TransactionStatus,
    TransferReceipt,
};

//! `teller-infra` — storage interfaces, in-memory implementations, and the
//! ledger orchestration service.
//!
//! The domain crates stay pure; everything that locks, times out, or commits
//! lives here.

pub mod locks;
pub mod service;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use locks::AccountLocks;
pub use service::{LedgerConfig, LedgerService};
pub use store::{
    AccountStore, AccountWrite, CardDirectory, ExpectedVersion, InMemoryCardDirectory,
    InMemoryLedgerStore, LedgerCommit, LedgerStore, StoreError, TransactionLog, VersionedAccount,
};

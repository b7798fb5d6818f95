//! Record stores consumed by the ledger core.
//!
//! This module defines infrastructure-facing abstractions for account records
//! and the append-only transaction log without making any storage assumptions.

pub mod cards;
pub mod in_memory;
pub mod r#trait;

pub use cards::{CardDirectory, InMemoryCardDirectory};
pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{
    AccountStore, AccountWrite, ExpectedVersion, LedgerCommit, LedgerStore, StoreError,
    TransactionLog, VersionedAccount,
};

//! Storage boundary for the ledger core.
//!
//! Two collaborators sit behind this boundary: a versioned account record
//! store and an append-only transaction log. [`LedgerStore`] combines them and
//! adds the one thing the core cannot live without: a **multi-record atomic
//! commit**, so a balance update and the transaction record that justifies it
//! (or the two legs of a transfer) become durable together or not at all.

use std::sync::Arc;

use thiserror::Error;

use teller_core::{AccountId, TransactionId};
use teller_ledger::{Account, DateRange, Transaction};

/// Optimistic concurrency expectation for an account write.
///
/// A blind last-write-wins overwrite is not accepted by the store: every write
/// states the prior version it was computed from, and the store rejects the
/// write if that state is stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (migrations, seeding).
    Any,
    /// Require the record to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }
}

/// An account record together with its store version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedAccount {
    pub account: Account,
    pub version: u64,
}

/// A version-checked account write inside a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountWrite {
    pub account: Account,
    pub expected: ExpectedVersion,
}

impl AccountWrite {
    /// Write `account` on the condition that it is still at the version the
    /// caller read.
    pub fn from_read(read: &VersionedAccount, account: Account) -> Self {
        Self {
            account,
            expected: ExpectedVersion::Exact(read.version),
        }
    }
}

/// The atomic unit of durable change: a set of account writes and the
/// transaction records that justify them. Applied all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerCommit {
    pub accounts: Vec<AccountWrite>,
    pub transactions: Vec<Transaction>,
}

/// Store operation error.
///
/// These are infrastructure failures (stale versions, backend faults), as
/// opposed to domain failures; the service maps them at its boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    #[error("account does not exist in the store: {0}")]
    MissingAccount(AccountId),

    #[error("transaction id already present in the log: {0}")]
    DuplicateTransaction(TransactionId),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Versioned account record store.
pub trait AccountStore: Send + Sync {
    /// Fetch an account with its current version; `None` if the id does not
    /// resolve.
    fn get(&self, id: AccountId) -> Result<Option<VersionedAccount>, StoreError>;
}

/// Append-only transaction log, queryable per account and time range.
pub trait TransactionLog: Send + Sync {
    /// Append a single completed record (append-only; duplicates rejected).
    fn append(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// All records for `account_id` within `range` (inclusive bounds),
    /// ordered by `created_at` descending, newest first.
    fn query(&self, account_id: AccountId, range: &DateRange) -> Result<Vec<Transaction>, StoreError>;
}

/// The full storage boundary the ledger service commits through.
///
/// Implementations must make [`LedgerStore::commit`] atomic *and* atomically
/// visible: concurrent readers observe either none or all of a commit, never
/// a half-applied mutation.
pub trait LedgerStore: AccountStore + TransactionLog {
    /// Validate every version expectation, then apply every write and append
    /// as one unit. On any rejection nothing is applied.
    fn commit(&self, commit: LedgerCommit) -> Result<(), StoreError>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn get(&self, id: AccountId) -> Result<Option<VersionedAccount>, StoreError> {
        (**self).get(id)
    }
}

impl<S> TransactionLog for Arc<S>
where
    S: TransactionLog + ?Sized,
{
    fn append(&self, transaction: Transaction) -> Result<(), StoreError> {
        (**self).append(transaction)
    }

    fn query(&self, account_id: AccountId, range: &DateRange) -> Result<Vec<Transaction>, StoreError> {
        (**self).query(account_id, range)
    }
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn commit(&self, commit: LedgerCommit) -> Result<(), StoreError> {
        (**self).commit(commit)
    }
}

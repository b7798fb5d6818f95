//! In-memory ledger store.
//!
//! Intended for tests/dev. A single `RwLock` guards accounts and the log
//! together, so a commit is applied and becomes visible as one step.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use teller_core::{AccountId, TransactionId};
use teller_ledger::{Account, DateRange, Transaction};

use super::r#trait::{
    AccountStore, LedgerCommit, LedgerStore, StoreError, TransactionLog, VersionedAccount,
};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountId, VersionedAccount>,
    log: Vec<Transaction>,
    seen: HashSet<TransactionId>,
}

impl Inner {
    fn append_unchecked(&mut self, transaction: Transaction) {
        self.seen.insert(transaction.id);
        self.log.push(transaction);
    }
}

/// In-memory, atomically-committing ledger store.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Inner>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account record (the account-opening flow is external to the
    /// ledger core). New accounts start at version 1.
    pub fn open_account(&self, account: Account) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner
            .accounts
            .insert(account.id, VersionedAccount { account, version: 1 });
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

impl AccountStore for InMemoryLedgerStore {
    fn get(&self, id: AccountId) -> Result<Option<VersionedAccount>, StoreError> {
        Ok(self.read()?.accounts.get(&id).cloned())
    }
}

impl TransactionLog for InMemoryLedgerStore {
    fn append(&self, transaction: Transaction) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.seen.contains(&transaction.id) {
            return Err(StoreError::DuplicateTransaction(transaction.id));
        }
        inner.append_unchecked(transaction);
        Ok(())
    }

    fn query(&self, account_id: AccountId, range: &DateRange) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.read()?;
        let mut matches: Vec<Transaction> = inner
            .log
            .iter()
            .filter(|t| t.account_id == account_id && range.contains(t.created_at))
            .cloned()
            .collect();

        // Newest first; transaction ids (UUIDv7) break created_at ties.
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matches)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn commit(&self, commit: LedgerCommit) -> Result<(), StoreError> {
        let mut inner = self.write()?;

        // Phase 1: validate everything before touching anything.
        for write in &commit.accounts {
            let current = inner
                .accounts
                .get(&write.account.id)
                .ok_or(StoreError::MissingAccount(write.account.id))?;
            if !write.expected.matches(current.version) {
                return Err(StoreError::Conflict(format!(
                    "account {}: expected {:?}, found {}",
                    write.account.id, write.expected, current.version
                )));
            }
        }
        for txn in &commit.transactions {
            if inner.seen.contains(&txn.id) {
                return Err(StoreError::DuplicateTransaction(txn.id));
            }
        }

        // Phase 2: apply everything under the same write guard, so readers
        // observe the commit all-or-nothing.
        for write in commit.accounts {
            let entry = inner
                .accounts
                .get_mut(&write.account.id)
                .expect("validated in phase 1");
            entry.version += 1;
            entry.account = write.account;
        }
        for txn in commit.transactions {
            inner.append_unchecked(txn);
        }

        Ok(())
    }
}

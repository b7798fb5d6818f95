//! Ledger orchestration service.
//!
//! Every operation follows the same pipeline: validate → acquire the
//! account lock(s) → re-read state under the lock → decide through the pure
//! domain functions → commit one atomic unit → return the completed record(s).
//! Domain code stays pure; this module owns the locking discipline and the
//! error mapping.

use std::time::Duration;

use chrono::Utc;

use teller_auth::{CardStatus, CardValidation};
use teller_core::{AccountId, Money};
use teller_ledger::{
    Account, BalanceView, DateRange, HistoryQuery, LedgerError, Transaction, TransactionCategory,
    TransactionKind, TransferReceipt, reconcile,
};

use crate::locks::AccountLocks;
use crate::store::{AccountWrite, CardDirectory, LedgerCommit, LedgerStore, VersionedAccount};

/// Service tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct LedgerConfig {
    /// Bound on waiting for an account's mutation lock.
    pub lock_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
        }
    }
}

/// The ledger core: balance-affecting operations with per-account
/// serialization and all-or-nothing persistence.
///
/// Generic over the record store and the card directory so tests run against
/// in-memory implementations and a real backend slots in unchanged.
#[derive(Debug)]
pub struct LedgerService<S, C> {
    store: S,
    cards: C,
    locks: AccountLocks,
    config: LedgerConfig,
}

impl<S, C> LedgerService<S, C> {
    pub fn new(store: S, cards: C) -> Self {
        Self::with_config(store, cards, LedgerConfig::default())
    }

    pub fn with_config(store: S, cards: C, config: LedgerConfig) -> Self {
        Self {
            store,
            cards,
            locks: AccountLocks::new(),
            config,
        }
    }

    #[cfg(test)]
    pub(crate) fn locks(&self) -> &AccountLocks {
        &self.locks
    }
}

impl<S, C> LedgerService<S, C>
where
    S: LedgerStore,
    C: CardDirectory,
{
    /// Balance query. Read-only; observes a consistent snapshot because the
    /// store applies commits atomically.
    pub fn balance(&self, account_id: AccountId) -> Result<BalanceView, LedgerError> {
        let read = self.load(account_id)?;
        Ok(read.account.balance_view())
    }

    /// Deposit `amount` into the account.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        self.mutate(
            account_id,
            amount,
            TransactionKind::Deposit,
            description.unwrap_or_else(|| "ATM Deposit".to_string()),
        )
        .await
    }

    /// Withdraw `amount` from the account. Sufficiency is decided against the
    /// balance read under the lock, never a stale pre-lock read.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        self.mutate(
            account_id,
            amount,
            TransactionKind::Withdrawal,
            description.unwrap_or_else(|| "ATM Withdrawal".to_string()),
        )
        .await
    }

    /// Move `amount` between two accounts as one atomic unit: both legs and
    /// both balance updates commit together, or nothing does.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<TransferReceipt, LedgerError> {
        ensure_positive(amount)?;
        if from == to {
            return Err(LedgerError::InvalidTransfer(
                "source and destination accounts are the same".to_string(),
            ));
        }

        let _guards = self
            .locks
            .acquire_pair(from, to, self.config.lock_timeout)
            .await?;

        let source = self.load(from)?;
        let destination = self.load(to)?;

        let source_after = source.account.debited(amount)?;
        let destination_after = destination.account.credited(amount)?;

        let now = Utc::now();
        let withdrawal = Transaction::completed(
            from,
            TransactionKind::TransferOut,
            amount,
            source_after,
            Some(format!("Transfer to {}", destination.account.number)),
            TransactionCategory::Transfer,
            now,
        );
        let deposit = Transaction::completed(
            to,
            TransactionKind::TransferIn,
            amount,
            destination_after,
            Some(format!("Transfer from {}", source.account.number)),
            TransactionCategory::Transfer,
            now,
        );

        let commit = LedgerCommit {
            accounts: vec![
                account_write(&source, source_after),
                account_write(&destination, destination_after),
            ],
            transactions: vec![withdrawal.clone(), deposit.clone()],
        };
        self.store.commit(commit).map_err(persistence)?;

        tracing::info!(
            from = %from,
            to = %to,
            amount = %amount,
            "transfer completed"
        );

        Ok(TransferReceipt { withdrawal, deposit })
    }

    /// Transaction history, newest first, inclusive date bounds, optionally
    /// capped to the most recent `limit` records.
    pub fn history(
        &self,
        account_id: AccountId,
        query: &HistoryQuery,
    ) -> Result<Vec<Transaction>, LedgerError> {
        // Distinguish "no matching records" (valid, empty) from "no account".
        self.load(account_id)?;

        let mut records = self
            .store
            .query(account_id, &query.range)
            .map_err(persistence)?;
        if let Some(limit) = query.limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    /// Validate a card/PIN pair and resolve the linked account.
    ///
    /// Failures stay coarse by design: each step collapses to its own kind
    /// without describing which lookup or comparison failed.
    pub fn validate_card(&self, card_number: &str, pin: &str) -> Result<CardValidation, LedgerError> {
        let card = self
            .cards
            .find_by_number(card_number)
            .map_err(persistence)?
            .ok_or(LedgerError::InvalidCard)?;

        if !card.pin.matches(pin) {
            return Err(LedgerError::InvalidPin);
        }
        if card.status != CardStatus::Active {
            return Err(LedgerError::CardInactive);
        }

        // A card pointing at a missing account is a credential problem from
        // the caller's point of view, not a ledger one.
        let account = self
            .load(card.account_id)
            .map_err(|_| LedgerError::InvalidCard)?;

        Ok(CardValidation {
            card_id: card.id,
            account_id: account.account.id,
            account_number: account.account.number.to_string(),
        })
    }

    /// Verify that the stored balance reconciles with the complete completed
    /// history (and its newest `balance_after`). Takes the account lock so the
    /// snapshot is consistent with in-flight mutations.
    pub async fn reconcile(&self, account_id: AccountId) -> Result<(), LedgerError> {
        let _guard = self
            .locks
            .acquire(account_id, self.config.lock_timeout)
            .await?;

        let read = self.load(account_id)?;
        let history = self
            .store
            .query(account_id, &DateRange::unbounded())
            .map_err(persistence)?;

        reconcile::verify_against_history(&read.account, &history)
    }

    /// Shared deposit/withdrawal path: single-account lock, decide, one
    /// atomic commit of balance + record.
    async fn mutate(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        description: String,
    ) -> Result<Transaction, LedgerError> {
        ensure_positive(amount)?;

        let _guard = self
            .locks
            .acquire(account_id, self.config.lock_timeout)
            .await?;

        let read = self.load(account_id)?;
        let balance_after = match kind {
            TransactionKind::Deposit => read.account.credited(amount)?,
            TransactionKind::Withdrawal => read.account.debited(amount)?,
            // Transfer legs never go through the single-account path.
            TransactionKind::TransferOut | TransactionKind::TransferIn => {
                return Err(LedgerError::InvalidTransfer(
                    "transfer legs require the transfer operation".to_string(),
                ));
            }
        };

        let transaction = Transaction::completed(
            account_id,
            kind,
            amount,
            balance_after,
            Some(description),
            TransactionCategory::Other,
            Utc::now(),
        );

        let commit = LedgerCommit {
            accounts: vec![account_write(&read, balance_after)],
            transactions: vec![transaction.clone()],
        };
        self.store.commit(commit).map_err(persistence)?;

        tracing::info!(
            account_id = %account_id,
            kind = ?kind,
            amount = %amount,
            balance_after = %balance_after,
            "ledger mutation committed"
        );

        Ok(transaction)
    }

    fn load(&self, account_id: AccountId) -> Result<VersionedAccount, LedgerError> {
        self.store
            .get(account_id)
            .map_err(persistence)?
            .ok_or(LedgerError::AccountNotFound)
    }
}

fn account_write(read: &VersionedAccount, balance_after: Money) -> AccountWrite {
    let mut account: Account = read.account.clone();
    account.balance = balance_after;
    AccountWrite::from_read(read, account)
}

fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn persistence(err: crate::store::StoreError) -> LedgerError {
    LedgerError::Persistence(err.to_string())
}

//! Per-account mutation locks.
//!
//! At most one in-flight mutating operation per account. The registry hands
//! out one async mutex per account id, lazily; acquisition is bounded, so a
//! stuck holder degrades into a retryable [`LedgerError::LockTimeout`] rather
//! than an unbounded wait. Contention is scoped to the account; unrelated
//! accounts never contend here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use teller_core::AccountId;
use teller_ledger::LedgerError;

/// Exclusive mutation rights on one account, released on drop.
pub type AccountGuard = OwnedMutexGuard<()>;

#[derive(Debug, Default)]
pub struct AccountLocks {
    registry: StdMutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, id: AccountId) -> Result<Arc<Mutex<()>>, LedgerError> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| LedgerError::Persistence("lock registry poisoned".to_string()))?;
        Ok(Arc::clone(registry.entry(id).or_default()))
    }

    /// Acquire the account's exclusive lock, waiting at most `timeout`.
    pub async fn acquire(&self, id: AccountId, timeout: Duration) -> Result<AccountGuard, LedgerError> {
        let lock = self.handle(id)?;
        tokio::time::timeout(timeout, lock.lock_owned())
            .await
            .map_err(|_| LedgerError::LockTimeout)
    }

    /// Acquire two account locks in identifier order, a total order
    /// independent of call direction, so opposing transfers on the same pair
    /// of accounts cannot deadlock. `a` and `b` must differ.
    pub async fn acquire_pair(
        &self,
        a: AccountId,
        b: AccountId,
        timeout: Duration,
    ) -> Result<(AccountGuard, AccountGuard), LedgerError> {
        debug_assert_ne!(a, b);
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first, timeout).await?;
        let second_guard = self.acquire(second, timeout).await?;
        Ok((first_guard, second_guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn second_acquire_times_out_while_held() {
        let locks = AccountLocks::new();
        let id = AccountId::new();

        let _held = locks.acquire(id, TIMEOUT).await.unwrap();
        let err = locks.acquire(id, TIMEOUT).await.unwrap_err();
        assert_eq!(err, LedgerError::LockTimeout);
    }

    #[tokio::test]
    async fn released_lock_can_be_reacquired() {
        let locks = AccountLocks::new();
        let id = AccountId::new();

        drop(locks.acquire(id, TIMEOUT).await.unwrap());
        assert!(locks.acquire(id, TIMEOUT).await.is_ok());
    }

    #[tokio::test]
    async fn unrelated_accounts_do_not_contend() {
        let locks = AccountLocks::new();
        let _a = locks.acquire(AccountId::new(), TIMEOUT).await.unwrap();
        let _b = locks.acquire(AccountId::new(), TIMEOUT).await.unwrap();
    }

    #[tokio::test]
    async fn pair_acquisition_order_is_direction_independent() {
        let locks = AccountLocks::new();
        let a = AccountId::new();
        let b = AccountId::new();

        let guards = locks.acquire_pair(a, b, TIMEOUT).await.unwrap();
        drop(guards);
        let guards = locks.acquire_pair(b, a, TIMEOUT).await.unwrap();
        drop(guards);
    }
}

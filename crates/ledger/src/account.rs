//! Account record and pure balance-decision functions.

use serde::{Deserialize, Serialize};

use teller_core::{AccountId, Money};

use crate::error::LedgerError;

/// Human-facing account number (opaque; used in transfer cross-references and
/// card validation responses, never as the primary key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// High-level account kind (the "account type" reported by balance queries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountKind::Checking => f.write_str("checking"),
            AccountKind::Savings => f.write_str("savings"),
        }
    }
}

/// Account lifecycle status. Only `Active` accounts accept mutating
/// operations; closing is soft (the record stays while transactions reference
/// it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Frozen,
    Closed,
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountStatus::Active => f.write_str("active"),
            AccountStatus::Frozen => f.write_str("frozen"),
            AccountStatus::Closed => f.write_str("closed"),
        }
    }
}

/// Account record.
///
/// `balance` is a materialized cache over the account's completed transaction
/// history: at every point it equals the signed sum of that history (see
/// [`crate::reconcile`]). Accounts are created externally and mutated
/// exclusively through ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub number: AccountNumber,
    pub kind: AccountKind,
    pub balance: Money,
    pub status: AccountStatus,
}

impl Account {
    pub fn ensure_active(&self) -> Result<(), LedgerError> {
        match self.status {
            AccountStatus::Active => Ok(()),
            other => Err(LedgerError::AccountNotActive(other)),
        }
    }

    /// Decide the balance after crediting `amount`.
    ///
    /// Pure: returns the new balance, mutates nothing. The caller applies it
    /// atomically together with the transaction record.
    pub fn credited(&self, amount: Money) -> Result<Money, LedgerError> {
        self.ensure_active()?;
        ensure_positive(amount)?;
        self.balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::InvalidAmount("balance overflow".to_string()))
    }

    /// Decide the balance after debiting `amount`.
    ///
    /// The sufficiency check happens here, against the balance the caller read
    /// under the account lock, never against a stale pre-lock read.
    pub fn debited(&self, amount: Money) -> Result<Money, LedgerError> {
        self.ensure_active()?;
        ensure_positive(amount)?;
        self.balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)
    }

    /// External-facing balance view (never includes internal fields).
    pub fn balance_view(&self) -> BalanceView {
        BalanceView {
            account_id: self.id,
            number: self.number.clone(),
            kind: self.kind,
            balance: self.balance,
        }
    }
}

/// Read-only answer to a balance query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceView {
    pub account_id: AccountId,
    pub number: AccountNumber,
    pub kind: AccountKind,
    pub balance: Money,
}

pub(crate) fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

//! Immutable transaction records and history queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use teller_core::{AccountId, Money, TransactionId};

/// What a transaction did to its account's balance.
///
/// A transfer is a linked pair of records (`TransferOut` on the source,
/// `TransferIn` on the destination), so each leg stays independently auditable
/// against its own account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind increases the account balance.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

/// Transaction lifecycle status.
///
/// The ledger only ever persists `Completed` records, or nothing at all. The
/// other variants exist for interoperability with external
/// correction/reversal flows that are out of this system's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Informational spend category. No invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Food,
    Utilities,
    Entertainment,
    Transport,
    Salary,
    Transfer,
    #[default]
    Other,
}

/// A completed, immutable ledger entry.
///
/// `balance_after` is redundant but load-bearing: it records the account
/// balance immediately following this transaction, for audit and dispute
/// resolution, and must match a recomputation from history
/// ([`crate::reconcile`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub balance_after: Money,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub category: TransactionCategory,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a completed record, ready to be committed atomically with the
    /// balance update it justifies.
    pub fn completed(
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        balance_after: Money,
        description: Option<String>,
        category: TransactionCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            kind,
            amount,
            balance_after,
            status: TransactionStatus::Completed,
            description,
            category,
            created_at,
        }
    }

    /// The amount with its sign under single-entry running-balance semantics:
    /// credits positive, debits negative.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount.amount()
        } else {
            -self.amount.amount()
        }
    }
}

/// The two legs produced by a completed transfer, source leg first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub withdrawal: Transaction,
    pub deposit: Transaction,
}

/// Inclusive time window. A missing bound means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at > end {
                return false;
            }
        }
        true
    }
}

/// History query: inclusive date bounds plus an optional cap on the number of
/// most-recent records returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryQuery {
    pub range: DateRange,
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_range_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let range = DateRange {
            start: Some(start),
            end: Some(end),
        };

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(start - chrono::Duration::seconds(1)));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
        assert!(DateRange::unbounded().contains(start));
    }

    #[test]
    fn signed_amount_follows_kind() {
        let amount: Money = "25.00".parse().unwrap();
        let mk = |kind| {
            Transaction::completed(
                AccountId::new(),
                kind,
                amount,
                "100.00".parse().unwrap(),
                None,
                TransactionCategory::Other,
                Utc::now(),
            )
        };

        assert!(mk(TransactionKind::Deposit).signed_amount() > Decimal::ZERO);
        assert!(mk(TransactionKind::TransferIn).signed_amount() > Decimal::ZERO);
        assert!(mk(TransactionKind::Withdrawal).signed_amount() < Decimal::ZERO);
        assert!(mk(TransactionKind::TransferOut).signed_amount() < Decimal::ZERO);
    }

    #[test]
    fn transaction_serializes_amounts_as_strings() {
        let txn = Transaction::completed(
            AccountId::new(),
            TransactionKind::Deposit,
            "50.00".parse().unwrap(),
            "150.00".parse().unwrap(),
            Some("ATM Deposit".to_string()),
            TransactionCategory::Other,
            Utc::now(),
        );

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["amount"], "50.00");
        assert_eq!(json["balance_after"], "150.00");
        assert_eq!(json["kind"], "deposit");
        assert_eq!(json["status"], "completed");
    }
}

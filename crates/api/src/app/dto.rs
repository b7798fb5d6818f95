//! Request/response DTOs.
//!
//! Amounts cross this boundary as fixed-point decimal strings (`Money`'s
//! serde form), never as binary floating point.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use teller_core::{AccountId, Money};
use teller_ledger::{DateRange, HistoryQuery};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Money,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Money,
}

#[derive(Debug, Deserialize)]
pub struct ValidateCardRequest {
    pub card_number: String,
    pub pin: String,
}

/// Query string for history: inclusive date bounds, optional result cap.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl From<HistoryParams> for HistoryQuery {
    fn from(params: HistoryParams) -> Self {
        HistoryQuery {
            range: DateRange {
                start: params.start_date,
                end: params.end_date,
            },
            limit: params.limit,
        }
    }
}

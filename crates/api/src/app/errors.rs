use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use teller_ledger::LedgerError;

/// Map a ledger failure to a consistent HTTP error envelope.
///
/// Card/PIN failures keep their kind but stay coarse in wording; `LockTimeout`
/// and `Persistence` are the retryable kinds and say so.
pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::AccountNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "account not found")
        }
        LedgerError::InvalidAmount(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_amount", msg)
        }
        LedgerError::InsufficientFunds => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_funds",
            "insufficient funds",
        ),
        LedgerError::AccountNotActive(status) => json_error(
            StatusCode::CONFLICT,
            "account_not_active",
            format!("account is not active (status: {status})"),
        ),
        LedgerError::InvalidTransfer(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_transfer", msg)
        }
        LedgerError::InvalidCard => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_card", "card validation failed")
        }
        LedgerError::InvalidPin => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_pin", "card validation failed")
        }
        LedgerError::CardInactive => {
            json_error(StatusCode::UNAUTHORIZED, "card_inactive", "card validation failed")
        }
        LedgerError::LockTimeout => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "lock_timeout",
            "account is busy, retry the operation",
        ),
        LedgerError::Persistence(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "persistence_failure", msg)
        }
        LedgerError::ReconciliationMismatch { .. } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "reconciliation_mismatch",
            err.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

//! Per-account authorization at the API boundary.
//!
//! The ledger core never infers ownership from transport context: handlers
//! pass this explicit check before invoking any operation on an account.

use axum::http::StatusCode;

use teller_auth::authorize_account;
use teller_core::AccountId;

use crate::app::errors;
use crate::context::PrincipalContext;

pub fn require_account_access(
    principal: &PrincipalContext,
    account_id: AccountId,
) -> Result<(), axum::response::Response> {
    authorize_account(principal.principal(), account_id).map_err(|e| {
        errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string())
    })
}

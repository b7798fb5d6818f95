use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::routes::accounts::parse_account_id;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/accounts/:id/deposits", post(deposit))
        .route("/accounts/:id/withdrawals", post(withdraw))
        .route("/transfers", post(transfer))
}

pub async fn deposit(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let account_id = match parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_account_access(&principal, account_id) {
        return resp;
    }

    match services
        .ledger
        .deposit(account_id, body.amount, body.description)
        .await
    {
        Ok(txn) => (StatusCode::CREATED, Json(txn)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let account_id = match parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_account_access(&principal, account_id) {
        return resp;
    }

    match services
        .ledger
        .withdraw(account_id, body.amount, body.description)
        .await
    {
        Ok(txn) => (StatusCode::CREATED, Json(txn)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::TransferRequest>,
) -> axum::response::Response {
    // The caller needs an explicit grant on the *source* account; the
    // destination only receives funds.
    if let Err(resp) = authz::require_account_access(&principal, body.from_account_id) {
        return resp;
    }

    match services
        .ledger
        .transfer(body.from_account_id, body.to_account_id, body.amount)
        .await
    {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use teller_core::AccountId;
use teller_ledger::HistoryQuery;

use crate::app::{dto, errors};
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/accounts/:id/balance", get(get_balance))
        .route("/accounts/:id/transactions", get(get_history))
        .route("/accounts/:id/reconcile", post(reconcile))
}

pub fn parse_account_id(raw: &str) -> Result<AccountId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_account_id",
            "account id must be a UUID",
        )
    })
}

pub async fn get_balance(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let account_id = match parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_account_access(&principal, account_id) {
        return resp;
    }

    match services.ledger.balance(account_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_history(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(params): Query<dto::HistoryParams>,
) -> axum::response::Response {
    let account_id = match parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_account_access(&principal, account_id) {
        return resp;
    }

    let query = HistoryQuery::from(params);
    match services.ledger.history(account_id, &query) {
        Ok(items) => (
            StatusCode::OK,
            Json(serde_json::json!({ "items": items })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn reconcile(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let account_id = match parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_account_access(&principal, account_id) {
        return resp;
    }

    match services.ledger.reconcile(account_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reconciled": true })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

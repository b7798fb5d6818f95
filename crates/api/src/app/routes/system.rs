use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/whoami", get(whoami))
}

/// Liveness probe; unauthenticated.
pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "user_id": principal.user_id().to_string(),
            "accounts": principal
                .accounts()
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

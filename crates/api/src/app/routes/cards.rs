use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/cards/validate", post(validate_card))
}

pub async fn validate_card(
    Extension(services): Extension<Arc<crate::app::AppServices>>,
    Json(body): Json<dto::ValidateCardRequest>,
) -> axum::response::Response {
    match services
        .ledger
        .validate_card(&body.card_number, &body.pin)
    {
        Ok(validation) => (StatusCode::OK, Json(validation)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

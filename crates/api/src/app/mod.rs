//! HTTP API application wiring (axum router + service wiring).
//!
//! Folder structure:
//! - `services.rs`: infrastructure wiring (store, card directory, ledger service)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: String, services: Arc<AppServices>) -> Router {
    let verifier = Arc::new(teller_auth::Hs256TokenVerifier::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { verifier };

    // Protected routes: require a verified bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}

use axum::Router;

pub mod accounts;
pub mod cards;
pub mod system;
pub mod transactions;

pub fn router() -> Router {
    Router::new()
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(cards::router())
        .merge(system::router())
}

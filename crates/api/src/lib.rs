//! `teller-api` — HTTP surface over the ledger core.

pub mod app;
pub mod authz;
pub mod context;
pub mod middleware;

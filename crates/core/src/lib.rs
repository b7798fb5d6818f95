//! `teller-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the fixed-point [`Money`] value type.

pub mod id;
pub mod money;

pub use id::{AccountId, CardId, TransactionId, UserId};
pub use money::{Money, MoneyError};

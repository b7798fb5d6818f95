//! `teller-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: claims are
//! validated deterministically, token decoding sits behind a trait, and card
//! credentials never hold a plaintext PIN.

pub mod card;
pub mod claims;
pub mod principal;
pub mod token;

pub use card::{Card, CardStatus, CardValidation, PinHash};
pub use claims::{Claims, TokenValidationError, validate_claims};
pub use principal::{AuthzError, Principal, authorize_account};
pub use token::{Hs256TokenVerifier, TokenError, TokenVerifier};

//! Token claims model (transport-agnostic).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use teller_core::{AccountId, UserId};

/// The minimal claim set the backend expects once a token has been
/// decoded/verified by whatever transport layer is in use.
///
/// `accounts` is the explicit per-account authorization grant: the ledger
/// operations are only invoked for accounts listed here, checked at the API
/// boundary rather than implied by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / authenticated user.
    pub sub: UserId,

    /// Accounts this principal is authorized to operate on.
    pub accounts: Vec<AccountId>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate claims against a supplied clock.
///
/// Note: this validates the *claims* only. Signature verification/decoding is
/// the [`crate::token::TokenVerifier`]'s job.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

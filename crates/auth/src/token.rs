//! Token decoding and verification.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::claims::{Claims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature/structure failure from the underlying JWT library.
    #[error("malformed or unverifiable token: {0}")]
    Malformed(String),

    /// Structurally valid token with an unacceptable time window.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a bearer token and yields its claims.
///
/// Implementations handle signature verification only; the deterministic
/// time-window checks live in [`validate_claims`] so they can be tested with
/// an explicit clock.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// HMAC-SHA256 JWT verifier.
pub struct Hs256TokenVerifier {
    decoding_key: jsonwebtoken::DecodingKey,
}

impl Hs256TokenVerifier {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            decoding_key: jsonwebtoken::DecodingKey::from_secret(&secret),
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        // Expiry is validated against the caller-supplied clock below, not by
        // the library against the ambient one.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

//! ATM card credentials.
//!
//! PINs are stored as a salted one-way hash, never as plaintext, and
//! comparison happens digest-to-digest.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use teller_core::{AccountId, CardId};

/// Card lifecycle status. Only `Active` cards validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
}

/// Salted SHA-256 digest of a PIN.
#[derive(Clone, PartialEq, Eq)]
pub struct PinHash {
    salt: [u8; 16],
    digest: [u8; 32],
}

impl PinHash {
    /// Hash a PIN under a fresh random salt.
    pub fn new(pin: &str) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(pin, salt)
    }

    fn with_salt(pin: &str, salt: [u8; 16]) -> Self {
        Self {
            salt,
            digest: Self::digest(&salt, pin),
        }
    }

    fn digest(salt: &[u8; 16], pin: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(pin.as_bytes());
        hasher.finalize().into()
    }

    /// Whether `pin` hashes to this credential under its salt.
    pub fn matches(&self, pin: &str) -> bool {
        Self::digest(&self.salt, pin) == self.digest
    }
}

impl core::fmt::Debug for PinHash {
    // The digest is a credential; never print it.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PinHash(..)")
    }
}

/// Card record linking a card number to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub number: String,
    pub pin: PinHash,
    pub account_id: AccountId,
    pub status: CardStatus,
}

impl Card {
    pub fn active(number: impl Into<String>, pin: &str, account_id: AccountId) -> Self {
        Self {
            id: CardId::new(),
            number: number.into(),
            pin: PinHash::new(pin),
            account_id,
            status: CardStatus::Active,
        }
    }
}

/// Successful card validation result: the session context an ATM needs, and
/// nothing else (no credential material).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardValidation {
    pub card_id: CardId,
    pub account_id: AccountId,
    pub account_number: String,
}

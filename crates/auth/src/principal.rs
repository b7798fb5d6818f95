//! Authenticated principal and per-account authorization.

use thiserror::Error;

use teller_core::{AccountId, UserId};

use crate::claims::Claims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("principal is not authorized for this account")]
    AccountNotGranted,
}

/// An authenticated caller, with the accounts it may operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    accounts: Vec<AccountId>,
}

impl Principal {
    pub fn new(user_id: UserId, accounts: Vec<AccountId>) -> Self {
        Self { user_id, accounts }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn is_granted(&self, account_id: AccountId) -> bool {
        self.accounts.contains(&account_id)
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.accounts)
    }
}

/// Require that `principal` holds an explicit grant for `account_id`.
///
/// Ledger operations are only invoked after this check passes; the core never
/// infers ownership from transport context.
pub fn authorize_account(principal: &Principal, account_id: AccountId) -> Result<(), AuthzError> {
    if principal.is_granted(account_id) {
        Ok(())
    } else {
        Err(AuthzError::AccountNotGranted)
    }
}

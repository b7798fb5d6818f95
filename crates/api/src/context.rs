//! Request-scoped context derived from the verified token.

use teller_auth::Principal;
use teller_core::{AccountId, UserId};

/// The authenticated caller attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id()
    }

    pub fn accounts(&self) -> &[AccountId] {
        self.principal.accounts()
    }
}

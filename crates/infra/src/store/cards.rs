//! Card directory (credential lookup by card number).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use teller_auth::Card;

use super::r#trait::StoreError;

/// Lookup boundary for ATM cards. Card issuance/management is external; the
/// ledger core only ever reads.
pub trait CardDirectory: Send + Sync {
    fn find_by_number(&self, number: &str) -> Result<Option<Card>, StoreError>;
}

impl<C> CardDirectory for Arc<C>
where
    C: CardDirectory + ?Sized,
{
    fn find_by_number(&self, number: &str) -> Result<Option<Card>, StoreError> {
        (**self).find_by_number(number)
    }
}

/// In-memory card directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCardDirectory {
    cards: RwLock<HashMap<String, Card>>,
}

impl InMemoryCardDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, card: Card) -> Result<(), StoreError> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        cards.insert(card.number.clone(), card);
        Ok(())
    }
}

impl CardDirectory for InMemoryCardDirectory {
    fn find_by_number(&self, number: &str) -> Result<Option<Card>, StoreError> {
        let cards = self
            .cards
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(cards.get(number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_core::AccountId;

    #[test]
    fn issued_cards_are_found_by_number() {
        let directory = InMemoryCardDirectory::new();
        let card = Card::active("4000123412341234", "4921", AccountId::new());
        directory.issue(card.clone()).unwrap();

        let found = directory.find_by_number("4000123412341234").unwrap();
        assert_eq!(found, Some(card));
        assert_eq!(directory.find_by_number("other").unwrap(), None);
    }
}

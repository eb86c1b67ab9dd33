//! Card storage.
//!
//! Only the two operations the card services need: save (insert or overwrite)
//! and load by id.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use prepaid_cards::{Card, CardRecord};
use prepaid_core::{CardId, DomainError, DomainResult};

use crate::create_card::Saver;

/// Storage for cards: a `Saver` that can also rebuild saved cards.
pub trait CardRepository: Saver {
    /// Load the card with `id`, or `DomainError::NotFound`.
    fn get_card(&self, id: CardId) -> DomainResult<Card>;
}

impl<R> CardRepository for Arc<R>
where
    R: CardRepository + ?Sized,
{
    fn get_card(&self, id: CardId) -> DomainResult<Card> {
        (**self).get_card(id)
    }
}

/// In-memory card store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    records: RwLock<HashMap<CardId, CardRecord>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Saver for InMemoryCardRepository {
    fn save_card(&self, card: &Card) -> DomainResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::persistence("card store lock poisoned"))?;
        records.insert(card.id_typed(), card.to_record());
        Ok(())
    }
}

impl CardRepository for InMemoryCardRepository {
    fn get_card(&self, id: CardId) -> DomainResult<Card> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::persistence("card store lock poisoned"))?;
        records
            .get(&id)
            .copied()
            .map(Card::from_record)
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use prepaid_core::UuidGenerator;

    use super::*;

    #[test]
    fn saved_card_can_be_loaded_back() {
        let repo = InMemoryCardRepository::new();
        let mut card = Card::new(&UuidGenerator).unwrap();
        card.load_money(25).unwrap();
        card.block_money(5).unwrap();

        repo.save_card(&card).unwrap();
        let loaded = repo.get_card(card.id_typed()).unwrap();

        assert_eq!(loaded.id_typed(), card.id_typed());
        assert_eq!(loaded.available_balance(), 20);
        assert_eq!(loaded.blocked_balance(), 5);
    }

    #[test]
    fn saving_again_overwrites() {
        let repo = InMemoryCardRepository::new();
        let mut card = Card::new(&UuidGenerator).unwrap();
        repo.save_card(&card).unwrap();

        card.load_money(9).unwrap();
        repo.save_card(&card).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get_card(card.id_typed()).unwrap().available_balance(), 9);
    }

    #[test]
    fn unknown_card_is_not_found() {
        let repo = InMemoryCardRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.get_card(CardId::new()), Err(DomainError::NotFound));
    }
}

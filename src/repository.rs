//! The authoritative in-memory deck collection.
//!
//! Every mutation is flushed through [`DeckStore::save`] before it returns.
//! A failed save rolls the in-memory change back, so memory never runs
//! ahead of the durable copy.

use tracing::{error, info};

use crate::error::{Error, Result};
use crate::model::{non_blank, Card, Deck};
use crate::store::{DeckStore, KvStore};

#[derive(Debug)]
pub struct Repository<S> {
    decks: Vec<Deck>,
    store: DeckStore<S>,
}

impl<S: KvStore> Repository<S> {
    /// Seed the collection from storage.
    pub fn open(store: DeckStore<S>) -> Self {
        let decks = store.load();
        Self { decks, store }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn store(&self) -> &DeckStore<S> {
        &self.store
    }

    pub fn deck(&self, id: &str) -> Result<&Deck> {
        self.decks
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::DeckNotFound { id: id.to_string() })
    }

    fn deck_index(&self, id: &str) -> Result<usize> {
        self.decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::DeckNotFound { id: id.to_string() })
    }

    /// Append a deck; `Ok(None)` when the trimmed name is empty.
    pub fn add_deck(&mut self, name: &str) -> Result<Option<&Deck>> {
        let Some(name) = non_blank(name) else {
            return Ok(None);
        };
        self.decks.push(Deck::new(name));
        if let Err(e) = self.flush() {
            self.decks.pop();
            return Err(e);
        }
        let deck = &self.decks[self.decks.len() - 1];
        info!(deck = %deck.id, name = %deck.name, "deck created");
        Ok(Some(deck))
    }

    /// Remove a deck together with all of its cards.
    pub fn remove_deck(&mut self, id: &str) -> Result<Deck> {
        let idx = self.deck_index(id)?;
        let removed = self.decks.remove(idx);
        if let Err(e) = self.flush() {
            self.decks.insert(idx, removed);
            return Err(e);
        }
        info!(deck = %removed.id, cards = removed.cards.len(), "deck deleted");
        Ok(removed)
    }

    /// Append a card; `Ok(None)` when either trimmed side is empty.
    pub fn add_card(&mut self, deck_id: &str, front: &str, back: &str) -> Result<Option<&Card>> {
        let idx = self.deck_index(deck_id)?;
        let (Some(front), Some(back)) = (non_blank(front), non_blank(back)) else {
            return Ok(None);
        };
        self.decks[idx].cards.push(Card::new(front, back));
        if let Err(e) = self.flush() {
            self.decks[idx].cards.pop();
            return Err(e);
        }
        let cards = &self.decks[idx].cards;
        let card = &cards[cards.len() - 1];
        info!(deck = %deck_id, card = %card.id, "card created");
        Ok(Some(card))
    }

    pub fn remove_card(&mut self, deck_id: &str, card_id: &str) -> Result<Card> {
        let idx = self.deck_index(deck_id)?;
        let pos = self.decks[idx]
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| Error::CardNotFound {
                deck_id: deck_id.to_string(),
                card_id: card_id.to_string(),
            })?;
        let removed = self.decks[idx].cards.remove(pos);
        if let Err(e) = self.flush() {
            self.decks[idx].cards.insert(pos, removed);
            return Err(e);
        }
        info!(deck = %deck_id, card = %removed.id, "card deleted");
        Ok(removed)
    }

    /// Replace the in-memory collection with whatever storage holds now.
    pub fn reload(&mut self) {
        self.decks = self.store.load();
        info!(decks = self.decks.len(), "reloaded from storage");
    }

    fn flush(&mut self) -> Result<()> {
        self.store.save(&self.decks).inspect_err(|e| {
            error!(error = %e, "failed to persist decks");
        })
    }
}

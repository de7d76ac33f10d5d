//! Per-session application state threaded through the controllers.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::{Card, Deck};
use crate::repository::Repository;
use crate::router::{Router, View};
use crate::store::{DeckStore, KvStore};

/// Which face of the study card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudyState {
    pub index: usize,
    pub side: Side,
}

/// Blocking messages the user has to acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyDeck,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDeck => f.write_str("This deck has no cards"),
        }
    }
}

/// Delivers a [`Notice`] to the user.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices instead of showing them.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[derive(Debug)]
pub struct Session<S> {
    pub(crate) repo: Repository<S>,
    pub(crate) router: Router,
    pub(crate) study: StudyState,
}

impl<S: KvStore> Session<S> {
    /// Start on the deck list with decks read from `kv`.
    pub fn open(kv: S) -> Self {
        Self {
            repo: Repository::open(DeckStore::new(kv)),
            router: Router::new(),
            study: StudyState::default(),
        }
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn view(&self) -> View {
        self.router.view()
    }

    pub fn study(&self) -> StudyState {
        self.study
    }

    pub fn open_deck_id(&self) -> Option<&str> {
        self.router.open_deck_id()
    }

    pub fn open_deck(&self) -> Result<&Deck> {
        let id = self.router.open_deck_id().ok_or(Error::NoOpenDeck)?;
        self.repo.deck(id)
    }

    /// Card under the study cursor.
    pub fn current_card(&self) -> Result<&Card> {
        let deck = self.open_deck()?;
        deck.cards
            .get(self.study.index)
            .ok_or_else(|| Error::CardNotFound {
                deck_id: deck.id.clone(),
                card_id: format!("#{}", self.study.index),
            })
    }

    /// Re-read storage. Falls back to the deck list if the open deck is
    /// gone, and clamps the study cursor if its deck shrank.
    pub fn reload(&mut self) {
        self.repo.reload();
        let count = match self.open_deck().map(|d| d.cards.len()) {
            Ok(count) => count,
            Err(_) => {
                self.router.reset();
                self.study = StudyState::default();
                return;
            }
        };
        if self.router.view() == View::Study {
            if count == 0 {
                self.study = StudyState::default();
                self.router.close_study();
            } else if self.study.index >= count {
                self.study = StudyState {
                    index: count - 1,
                    side: Side::Front,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKv;

    #[test]
    fn test_side_flipped() {
        assert_eq!(Side::Front.flipped(), Side::Back);
        assert_eq!(Side::Back.flipped(), Side::Front);
        assert_eq!(Side::default(), Side::Front);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::EmptyDeck.to_string(), "This deck has no cards");
    }

    #[test]
    fn test_open_deck_requires_selection() {
        let s = Session::open(MemoryKv::new());
        assert!(matches!(s.open_deck(), Err(Error::NoOpenDeck)));
        assert_eq!(s.view(), View::DeckList);
    }

    #[test]
    fn test_reload_drops_vanished_deck() {
        let mut s = Session::open(MemoryKv::new());
        let id = s.repo.add_deck("Spanish").unwrap().unwrap().id.clone();
        s.router.open_deck(id).unwrap();
        s.repo = Repository::open(DeckStore::new(MemoryKv::new()));
        s.reload();
        assert_eq!(s.view(), View::DeckList);
        assert!(s.open_deck_id().is_none());
    }

    #[test]
    fn test_reload_leaves_study_when_deck_emptied() {
        let mut s = Session::open(MemoryKv::new());
        let id = s.repo.add_deck("Spanish").unwrap().unwrap().id.clone();
        let card = s.repo.add_card(&id, "hola", "hello").unwrap().unwrap().id.clone();
        s.router.open_deck(id.clone()).unwrap();
        s.router.enter_study().unwrap();
        s.repo.remove_card(&id, &card).unwrap();

        s.reload();
        assert_eq!(s.view(), View::CardList);
        assert_eq!(s.open_deck_id(), Some(id.as_str()));
        assert_eq!(s.study(), StudyState::default());
    }
}

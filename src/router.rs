//! Which of the three screens is visible, and which deck is open.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    DeckList,
    CardList,
    Study,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeckList => "deck list",
            Self::CardList => "card list",
            Self::Study => "study",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one view is active; starts on the deck list and never terminates.
#[derive(Debug, Clone, Default)]
pub struct Router {
    view: View,
    open_deck: Option<String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn open_deck_id(&self) -> Option<&str> {
        self.open_deck.as_deref()
    }

    /// Fail with [`Error::InvalidTransition`] unless `from` is the active view.
    pub fn require(&self, from: View, action: &'static str) -> Result<()> {
        if self.view == from {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.view,
                action,
            })
        }
    }

    pub fn open_deck(&mut self, id: impl Into<String>) -> Result<()> {
        self.require(View::DeckList, "open a deck")?;
        let id = id.into();
        debug!(deck = %id, "deck list -> card list");
        self.open_deck = Some(id);
        self.view = View::CardList;
        Ok(())
    }

    pub fn back_to_decks(&mut self) -> Result<()> {
        self.require(View::CardList, "go back to decks")?;
        debug!("card list -> deck list");
        self.open_deck = None;
        self.view = View::DeckList;
        Ok(())
    }

    pub fn enter_study(&mut self) -> Result<()> {
        self.require(View::CardList, "start study")?;
        debug!("card list -> study");
        self.view = View::Study;
        Ok(())
    }

    pub fn exit_study(&mut self) -> Result<()> {
        self.require(View::Study, "exit study")?;
        debug!("study -> card list");
        self.view = View::CardList;
        Ok(())
    }

    /// Leave study if it is active; a no-op on the other views.
    pub fn close_study(&mut self) {
        if self.view == View::Study {
            debug!("study -> card list (closed)");
            self.view = View::CardList;
        }
    }

    /// Drop back to the deck list unconditionally, e.g. after the open
    /// deck disappeared on reload.
    pub fn reset(&mut self) {
        self.open_deck = None;
        self.view = View::DeckList;
    }
}

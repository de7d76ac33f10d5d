//! What each screen shows, derived from the session alone.
//!
//! The terminal drawer only ever sees a [`Screen`]; nothing here knows about
//! ratatui.

use crate::controller::study;
use crate::error::Result;
use crate::model::Deck;
use crate::router::View;
use crate::session::{Session, Side};
use crate::store::KvStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRow {
    pub id: String,
    pub name: String,
    pub card_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub id: String,
    pub front: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    DeckList {
        rows: Vec<DeckRow>,
    },
    CardList {
        title: String,
        rows: Vec<CardRow>,
    },
    Study {
        deck: String,
        /// Text of the visible side only.
        text: String,
        side: Side,
        progress: String,
    },
}

impl Screen {
    /// Number of selectable rows.
    pub fn len(&self) -> usize {
        match self {
            Self::DeckList { rows } => rows.len(),
            Self::CardList { rows, .. } => rows.len(),
            Self::Study { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id behind the row at `idx`, on list screens.
    pub fn row_id(&self, idx: usize) -> Option<&str> {
        match self {
            Self::DeckList { rows } => rows.get(idx).map(|r| r.id.as_str()),
            Self::CardList { rows, .. } => rows.get(idx).map(|r| r.id.as_str()),
            Self::Study { .. } => None,
        }
    }
}

pub fn describe<S: KvStore>(session: &Session<S>) -> Result<Screen> {
    match session.view() {
        View::DeckList => Ok(Screen::DeckList {
            rows: session
                .repository()
                .decks()
                .iter()
                .map(|d| DeckRow {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    card_count: d.cards.len(),
                })
                .collect(),
        }),
        View::CardList => {
            let deck = session.open_deck()?;
            Ok(Screen::CardList {
                title: deck.name.clone(),
                rows: deck
                    .cards
                    .iter()
                    .map(|c| CardRow {
                        id: c.id.clone(),
                        front: c.front.clone(),
                    })
                    .collect(),
            })
        }
        View::Study => {
            let deck = session.open_deck()?;
            let card = session.current_card()?;
            let side = session.study().side;
            let text = match side {
                Side::Front => card.front.clone(),
                Side::Back => card.back.clone(),
            };
            Ok(Screen::Study {
                deck: deck.name.clone(),
                text,
                side,
                progress: study::progress(session)?,
            })
        }
    }
}

/// Plain-text dump of every deck and its card fronts.
pub fn listing(decks: &[Deck]) -> String {
    let mut out = String::new();
    for d in decks {
        let noun = if d.cards.len() == 1 { "card" } else { "cards" };
        out.push_str(&format!("{} ({} {noun})\n", d.name, d.cards.len()));
        for c in &d.cards {
            out.push_str(&format!("  - {}\n", c.front));
        }
    }
    out
}

use tracing::info;

use crate::error::{Error, Result};
use crate::router::View;
use crate::session::{Notice, Notifier, Session, Side, StudyState};
use crate::store::KvStore;

fn open_id<S: KvStore>(session: &Session<S>) -> Result<String> {
    session
        .open_deck_id()
        .map(str::to_string)
        .ok_or(Error::NoOpenDeck)
}

/// Append a card to the open deck. Returns `false` and changes nothing
/// when either side is blank.
pub fn create_card<S: KvStore>(session: &mut Session<S>, front: &str, back: &str) -> Result<bool> {
    session.router.require(View::CardList, "add a card")?;
    let deck_id = open_id(session)?;
    Ok(session.repo.add_card(&deck_id, front, back)?.is_some())
}

/// Remove a card from the open deck. Only allowed on the card list, so the
/// study cursor never points past the end of the deck.
pub fn delete_card<S: KvStore>(session: &mut Session<S>, card_id: &str) -> Result<()> {
    session.router.require(View::CardList, "delete a card")?;
    let deck_id = open_id(session)?;
    session.repo.remove_card(&deck_id, card_id)?;
    Ok(())
}

pub fn back_to_decks<S: KvStore>(session: &mut Session<S>) -> Result<()> {
    session.router.back_to_decks()
}

/// Enter study mode at the first card, front up. An empty deck raises
/// [`Notice::EmptyDeck`] instead and stays on the card list.
pub fn start_study<S: KvStore>(
    session: &mut Session<S>,
    notifier: &mut impl Notifier,
) -> Result<bool> {
    session.router.require(View::CardList, "start study")?;
    let deck = session.open_deck()?;
    if deck.cards.is_empty() {
        info!(deck = %deck.id, "refusing to study an empty deck");
        notifier.notify(Notice::EmptyDeck);
        return Ok(false);
    }
    session.router.enter_study()?;
    session.study = StudyState {
        index: 0,
        side: Side::Front,
    };
    Ok(true)
}

use crate::error::Result;
use crate::router::View;
use crate::session::Session;
use crate::store::KvStore;

/// Append a deck named `name` (trimmed). Returns `false` and changes
/// nothing when the name is blank.
pub fn create_deck<S: KvStore>(session: &mut Session<S>, name: &str) -> Result<bool> {
    session.router.require(View::DeckList, "add a deck")?;
    Ok(session.repo.add_deck(name)?.is_some())
}

/// Delete a deck and its cards right away. Only allowed on the deck list,
/// where no deck is open.
pub fn delete_deck<S: KvStore>(session: &mut Session<S>, id: &str) -> Result<()> {
    session.router.require(View::DeckList, "delete a deck")?;
    session.repo.remove_deck(id)?;
    Ok(())
}

pub fn open_deck<S: KvStore>(session: &mut Session<S>, id: &str) -> Result<()> {
    session.repo.deck(id)?;
    session.router.open_deck(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryKv;

    #[test]
    fn test_create_and_delete() {
        let mut s = Session::open(MemoryKv::new());
        assert!(create_deck(&mut s, "Spanish").unwrap());
        assert!(create_deck(&mut s, "French").unwrap());
        let names: Vec<_> = s.repository().decks().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Spanish", "French"]);

        let id = s.repository().decks()[0].id.clone();
        delete_deck(&mut s, &id).unwrap();
        assert_eq!(s.repository().decks().len(), 1);
        assert_eq!(s.repository().store().load().len(), 1);
    }

    #[test]
    fn test_whitespace_name_leaves_repository_unchanged() {
        let mut s = Session::open(MemoryKv::new());
        create_deck(&mut s, "Spanish").unwrap();
        let before = s.repository().decks().to_vec();
        assert!(!create_deck(&mut s, "  \t ").unwrap());
        assert_eq!(s.repository().decks(), before.as_slice());
        assert_eq!(s.repository().store().load(), before);
    }

    #[test]
    fn test_open_unknown_deck_fails_fast() {
        let mut s = Session::open(MemoryKv::new());
        assert!(matches!(
            open_deck(&mut s, "missing"),
            Err(Error::DeckNotFound { .. })
        ));
        assert_eq!(s.view(), View::DeckList);
    }

    #[test]
    fn test_open_deck_switches_view() {
        let mut s = Session::open(MemoryKv::new());
        create_deck(&mut s, "Spanish").unwrap();
        let id = s.repository().decks()[0].id.clone();
        open_deck(&mut s, &id).unwrap();
        assert_eq!(s.view(), View::CardList);
        assert_eq!(s.open_deck().unwrap().name, "Spanish");
    }

    #[test]
    fn test_delete_open_deck_refused() {
        let mut s = Session::open(MemoryKv::new());
        create_deck(&mut s, "Spanish").unwrap();
        let id = s.repository().decks()[0].id.clone();
        open_deck(&mut s, &id).unwrap();

        assert!(matches!(
            delete_deck(&mut s, &id),
            Err(Error::InvalidTransition {
                from: View::CardList,
                action: "delete a deck",
            })
        ));
        assert_eq!(s.view(), View::CardList);
        assert_eq!(s.open_deck_id(), Some(id.as_str()));
        assert_eq!(s.open_deck().unwrap().name, "Spanish");
        assert_eq!(s.repository().store().load().len(), 1);
    }

    #[test]
    fn test_create_deck_outside_deck_list() {
        let mut s = Session::open(MemoryKv::new());
        create_deck(&mut s, "Spanish").unwrap();
        let id = s.repository().decks()[0].id.clone();
        open_deck(&mut s, &id).unwrap();
        assert!(create_deck(&mut s, "French").is_err());
        assert_eq!(s.repository().decks().len(), 1);
    }
}

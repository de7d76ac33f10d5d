use flashcards::{
    controller::{card_list, deck_list, study},
    router::View,
    session::{Notice, NoticeLog, Side},
    store::{DeckStore, FileKv},
    view::{describe, Screen},
    Session,
};
use tempfile::TempDir;

#[test]
fn spanish_deck_survives_reload() {
    let tmp = TempDir::new().unwrap();

    let mut s = Session::open(FileKv::new(tmp.path()));
    assert!(deck_list::create_deck(&mut s, "Spanish").unwrap());
    let id = s.repository().decks()[0].id.clone();
    deck_list::open_deck(&mut s, &id).unwrap();
    assert!(card_list::create_card(&mut s, "hola", "hello").unwrap());
    card_list::back_to_decks(&mut s).unwrap();

    deck_list::open_deck(&mut s, &id).unwrap();
    let mut notices = NoticeLog::default();
    assert!(card_list::start_study(&mut s, &mut notices).unwrap());
    assert!(notices.notices.is_empty());

    let Screen::Study { text, progress, .. } = describe(&s).unwrap() else {
        panic!("expected study screen");
    };
    assert_eq!(text, "hola");
    assert_eq!(progress, "1 / 1");

    study::flip(&mut s).unwrap();
    let Screen::Study { text, side, .. } = describe(&s).unwrap() else {
        panic!("expected study screen");
    };
    assert_eq!(text, "hello");
    assert_eq!(side, Side::Back);

    study::exit(&mut s).unwrap();
    card_list::back_to_decks(&mut s).unwrap();
    drop(s);

    let reloaded = Session::open(FileKv::new(tmp.path()));
    assert_eq!(reloaded.view(), View::DeckList);
    let Screen::DeckList { rows } = describe(&reloaded).unwrap() else {
        panic!("expected deck list");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Spanish");
    assert_eq!(rows[0].card_count, 1);
    let deck = reloaded.repository().deck(&id).unwrap();
    assert_eq!(deck.cards[0].front, "hola");
    assert_eq!(deck.cards[0].back, "hello");
}

#[test]
fn empty_deck_cannot_be_studied() {
    let tmp = TempDir::new().unwrap();
    let mut s = Session::open(FileKv::new(tmp.path()));
    deck_list::create_deck(&mut s, "Empty").unwrap();
    let id = s.repository().decks()[0].id.clone();
    deck_list::open_deck(&mut s, &id).unwrap();

    let mut notices = NoticeLog::default();
    assert!(!card_list::start_study(&mut s, &mut notices).unwrap());
    assert_eq!(s.view(), View::CardList);
    assert_eq!(notices.notices, vec![Notice::EmptyDeck]);
}

#[test]
fn deleted_deck_takes_its_cards_off_disk() {
    let tmp = TempDir::new().unwrap();
    let mut s = Session::open(FileKv::new(tmp.path()));
    deck_list::create_deck(&mut s, "Doomed").unwrap();
    let id = s.repository().decks()[0].id.clone();
    deck_list::open_deck(&mut s, &id).unwrap();
    card_list::create_card(&mut s, "a", "b").unwrap();
    card_list::create_card(&mut s, "c", "d").unwrap();
    card_list::back_to_decks(&mut s).unwrap();
    deck_list::delete_deck(&mut s, &id).unwrap();

    let on_disk = DeckStore::new(FileKv::new(tmp.path())).load();
    assert!(on_disk.is_empty());
}

#[test]
fn corrupt_store_starts_empty() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("flashcardsData.json"), "[{\"id\": 1").unwrap();
    let s = Session::open(FileKv::new(tmp.path()));
    assert!(s.repository().decks().is_empty());
}

//! Terminal front end: ratatui drawing, crossterm input.

mod draw;
mod form;

use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use std::collections::HashMap;
use tracing::{error, info};

use crate::config::KeyAction;
use crate::controller::{card_list, deck_list, study};
use crate::error::Result as CoreResult;
use crate::hit::StudyLayout;
use crate::router::View;
use crate::session::{Notice, Notifier, Session};
use crate::store::KvStore;
use crate::view::{describe, Screen};

pub use draw::{theme_of, ui, Theme};
pub use form::{Form, FormEvent, FormKind};

/// Holds the notice until the user dismisses it.
#[derive(Debug, Default)]
pub struct Modal {
    pub notice: Option<Notice>,
}

impl Notifier for Modal {
    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

#[derive(Debug)]
pub struct App<S> {
    pub session: Session<S>,
    pub screen: Screen,
    pub list_state: ListState,
    pub form: Option<Form>,
    pub modal: Modal,
    /// Last error, shown in the footer until the next key.
    pub status: Option<String>,
    pub keymap: HashMap<char, KeyAction>,
    pub theme: Theme,
    /// Study card geometry from the last frame, for mouse hits.
    pub study_layout: Option<StudyLayout>,
}

impl<S: KvStore> App<S> {
    pub fn new(session: Session<S>, keymap: HashMap<char, KeyAction>, theme: Theme) -> Self {
        let mut app = Self {
            session,
            screen: Screen::DeckList { rows: Vec::new() },
            list_state: ListState::default(),
            form: None,
            modal: Modal::default(),
            status: None,
            keymap,
            theme,
            study_layout: None,
        };
        app.refresh();
        app
    }

    /// Re-describe the current view and keep the selection in range.
    pub fn refresh(&mut self) {
        match describe(&self.session) {
            Ok(screen) => self.screen = screen,
            Err(e) => {
                error!(error = %e, "cannot describe view");
                self.status = Some(e.to_string());
                self.session.reload();
                if let Ok(screen) = describe(&self.session) {
                    self.screen = screen;
                }
            }
        }
        let n = self.screen.len();
        match self.list_state.selected() {
            _ if n == 0 => self.list_state.select(None),
            Some(sel) if sel >= n => self.list_state.select(Some(n - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
        if self.session.view() != View::Study {
            self.study_layout = None;
        }
    }

    fn selected_id(&self) -> Option<String> {
        let sel = self.list_state.selected()?;
        self.screen.row_id(sel).map(str::to_string)
    }

    fn move_selection(&mut self, delta: isize) {
        let n = self.screen.len();
        if n == 0 {
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, n as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    /// A view change starts the new list at its first row.
    fn switch_view(&mut self) {
        self.list_state.select(None);
        self.refresh();
    }

    fn apply_action(&mut self, action: KeyAction) -> CoreResult<bool> {
        let view = self.session.view();
        match (view, action) {
            (_, KeyAction::Quit) => return Ok(true),
            (_, KeyAction::Reload) => {
                self.session.reload();
                self.refresh();
            }
            (View::DeckList | View::CardList, KeyAction::Up) => self.move_selection(-1),
            (View::DeckList | View::CardList, KeyAction::Down) => self.move_selection(1),
            (View::DeckList, KeyAction::New) => self.form = Some(Form::new(FormKind::NewDeck)),
            (View::CardList, KeyAction::New) => self.form = Some(Form::new(FormKind::NewCard)),
            (View::DeckList, KeyAction::Open) => {
                if let Some(id) = self.selected_id() {
                    deck_list::open_deck(&mut self.session, &id)?;
                    self.switch_view();
                }
            }
            (View::DeckList, KeyAction::Delete) => {
                if let Some(id) = self.selected_id() {
                    deck_list::delete_deck(&mut self.session, &id)?;
                    self.refresh();
                }
            }
            (View::CardList, KeyAction::Delete) => {
                if let Some(id) = self.selected_id() {
                    card_list::delete_card(&mut self.session, &id)?;
                    self.refresh();
                }
            }
            (View::CardList, KeyAction::StartStudy) => {
                if card_list::start_study(&mut self.session, &mut self.modal)? {
                    self.switch_view();
                }
            }
            (View::CardList, KeyAction::Back) => {
                card_list::back_to_decks(&mut self.session)?;
                self.switch_view();
            }
            (View::Study, KeyAction::Flip) => {
                study::flip(&mut self.session)?;
                self.refresh();
            }
            (View::Study, KeyAction::Prev) => {
                study::prev(&mut self.session)?;
                self.refresh();
            }
            (View::Study, KeyAction::Next) => {
                study::next(&mut self.session)?;
                self.refresh();
            }
            (View::Study, KeyAction::Back) => {
                study::exit(&mut self.session)?;
                self.switch_view();
            }
            _ => {}
        }
        Ok(false)
    }

    fn submit_form(&mut self) -> CoreResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        match form.kind {
            FormKind::NewDeck => {
                let name = form.value(0);
                if deck_list::create_deck(&mut self.session, &name)? {
                    self.form = None;
                    self.refresh();
                    let n = self.screen.len();
                    self.list_state.select(n.checked_sub(1));
                }
            }
            FormKind::NewCard => {
                let (front, back) = (form.value(0), form.value(1));
                if card_list::create_card(&mut self.session, &front, &back)? {
                    // stays open for the next card
                    form.clear();
                    self.refresh();
                }
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if self.modal.notice.take().is_some() {
            return false;
        }
        self.status = None;
        let res = if let Some(form) = self.form.as_mut() {
            match form.handle(&key) {
                FormEvent::Submit => self.submit_form().map(|()| false),
                FormEvent::Cancel => {
                    self.form = None;
                    Ok(false)
                }
                FormEvent::Edited => Ok(false),
            }
        } else {
            let action = match key.code {
                KeyCode::Up => Some(KeyAction::Up),
                KeyCode::Down => Some(KeyAction::Down),
                KeyCode::Left => Some(KeyAction::Prev),
                KeyCode::Right => Some(KeyAction::Next),
                KeyCode::Esc => Some(KeyAction::Back),
                KeyCode::Enter => Some(match self.session.view() {
                    View::Study => KeyAction::Flip,
                    _ => KeyAction::Open,
                }),
                KeyCode::Char(ch) => self.keymap.get(&ch).copied(),
                _ => None,
            };
            match action {
                Some(a) => self.apply_action(a),
                None => Ok(false),
            }
        };
        self.report(res).unwrap_or(false)
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) {
        if self.modal.notice.is_some() || self.form.is_some() {
            return;
        }
        if ev.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(layout) = self.study_layout.as_ref() else {
            return;
        };
        let Some(target) = layout.tree.target_at(ev.column, ev.row) else {
            return;
        };
        let res = study::click(&mut self.session, layout, target);
        if self.report(res).is_some() {
            if self.session.view() == View::Study {
                self.refresh();
            } else {
                self.switch_view();
            }
        }
    }

    fn report<T>(&mut self, res: CoreResult<T>) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                error!(error = %e, "action failed");
                self.status = Some(e.to_string());
                None
            }
        }
    }
}

/// Take over the terminal and run until the user quits.
pub fn run<S: KvStore>(app: &mut App<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!("session started");

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("session ended");
    res
}

fn run_app<B: ratatui::backend::Backend, S: KvStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(k) => {
                    if app.handle_key(k) {
                        break;
                    }
                }
                Event::Mouse(m) => app.handle_mouse(m),
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_keymap, ThemeKind};
    use crate::hit::Control;
    use crate::session::Side;
    use crate::store::MemoryKv;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app() -> App<MemoryKv> {
        App::new(
            Session::open(MemoryKv::new()),
            default_keymap(),
            theme_of(ThemeKind::Dark),
        )
    }

    fn key(app: &mut App<MemoryKv>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App<MemoryKv>, s: &str) {
        for ch in s.chars() {
            key(app, KeyCode::Char(ch));
        }
    }

    fn draw(app: &mut App<MemoryKv>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    /// Deck "Spanish" with one card, opened on the card list.
    fn spanish() -> App<MemoryKv> {
        let mut a = app();
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "Spanish");
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "hola");
        key(&mut a, KeyCode::Tab);
        type_str(&mut a, "hello");
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Esc);
        a
    }

    #[test]
    fn test_keyboard_flow() {
        let mut a = spanish();
        assert_eq!(a.session.view(), View::CardList);
        assert!(a.form.is_none());
        assert_eq!(a.session.open_deck().unwrap().cards.len(), 1);

        key(&mut a, KeyCode::Char('s'));
        assert_eq!(a.session.view(), View::Study);
        key(&mut a, KeyCode::Char(' '));
        assert_eq!(a.session.study().side, Side::Back);
        key(&mut a, KeyCode::Esc);
        assert_eq!(a.session.view(), View::CardList);
        key(&mut a, KeyCode::Esc);
        assert_eq!(a.session.view(), View::DeckList);
        assert!(key(&mut a, KeyCode::Char('q')));
    }

    #[test]
    fn test_blank_deck_name_keeps_form_open() {
        let mut a = app();
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "   ");
        key(&mut a, KeyCode::Enter);
        assert!(a.form.is_some());
        assert_eq!(a.form.as_ref().unwrap().value(0), "   ");
        assert!(a.session.repository().decks().is_empty());
    }

    #[test]
    fn test_card_form_clears_after_submit() {
        let mut a = app();
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "Spanish");
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "hola");
        key(&mut a, KeyCode::Tab);
        type_str(&mut a, "hello");
        key(&mut a, KeyCode::Enter);
        let form = a.form.as_ref().unwrap();
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn test_empty_deck_notice_blocks_until_dismissed() {
        let mut a = app();
        key(&mut a, KeyCode::Char('n'));
        type_str(&mut a, "Empty");
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Enter);
        key(&mut a, KeyCode::Char('s'));
        assert_eq!(a.modal.notice, Some(Notice::EmptyDeck));
        assert_eq!(a.session.view(), View::CardList);
        assert!(draw(&mut a).contains("This deck has no cards"));

        // the dismissing key does nothing else
        key(&mut a, KeyCode::Esc);
        assert!(a.modal.notice.is_none());
        assert_eq!(a.session.view(), View::CardList);
    }

    #[test]
    fn test_delete_deck_from_list() {
        let mut a = spanish();
        key(&mut a, KeyCode::Esc);
        key(&mut a, KeyCode::Char('d'));
        assert!(a.session.repository().decks().is_empty());
        assert_eq!(a.list_state.selected(), None);
    }

    #[test]
    fn test_study_screen_draws_visible_side_and_progress() {
        let mut a = spanish();
        key(&mut a, KeyCode::Char('s'));
        let out = draw(&mut a);
        assert!(out.contains("hola"));
        assert!(!out.contains("hello"));
        assert!(out.contains("1 / 1"));

        key(&mut a, KeyCode::Char(' '));
        let out = draw(&mut a);
        assert!(out.contains("hello"));
        assert!(!out.contains("hola"));
    }

    /// Foreground color of the first cell of `word` on screen.
    fn color_of(app: &mut App<MemoryKv>, word: &str) -> Option<ratatui::style::Color> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let cells = &terminal.backend().buffer().content;
        let n = word.chars().count();
        (0..cells.len().saturating_sub(n))
            .find(|&i| {
                cells[i..i + n]
                    .iter()
                    .map(|c| c.symbol())
                    .collect::<String>()
                    == word
            })
            .map(|i| cells[i].fg)
    }

    #[test]
    fn test_side_labels_use_their_theme_colors() {
        let th = theme_of(ThemeKind::Dark);
        assert_ne!(th.front, th.back);
        let mut a = spanish();
        key(&mut a, KeyCode::Char('s'));
        assert_eq!(color_of(&mut a, "FRONT"), Some(th.front));
        key(&mut a, KeyCode::Char(' '));
        assert_eq!(color_of(&mut a, "BACK"), Some(th.back));
        assert_eq!(color_of(&mut a, "FRONT"), None);
    }

    #[test]
    fn test_palettes_differ_per_kind() {
        let dark = theme_of(ThemeKind::Dark);
        let light = theme_of(ThemeKind::Light);
        assert_ne!(dark.text, light.text);
        assert_ne!(dark.bar, light.bar);
        assert_ne!(light.front, light.back);
    }

    #[test]
    fn test_mouse_click_on_card_flips_but_not_on_button_label() {
        let mut a = spanish();
        key(&mut a, KeyCode::Char('s'));
        draw(&mut a);
        let layout = a.study_layout.clone().unwrap();

        let label = layout.tree.area(layout.label_of(Control::Next)).unwrap();
        a.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: label.x,
            row: label.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(a.session.study().side, Side::Front);

        let text = layout.tree.area(layout.text).unwrap();
        a.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: text.x + 1,
            row: text.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(a.session.study().side, Side::Back);
        assert!(draw(&mut a).contains("hello"));
    }

    #[test]
    fn test_mouse_back_button_leaves_study() {
        let mut a = spanish();
        key(&mut a, KeyCode::Char('s'));
        draw(&mut a);
        let layout = a.study_layout.clone().unwrap();
        let back = layout.tree.area(layout.back).unwrap();
        a.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: back.x,
            row: back.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(a.session.view(), View::CardList);
        assert!(a.study_layout.is_none());
    }
}

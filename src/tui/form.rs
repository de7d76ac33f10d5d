// ---------------- Input forms ----------------
// One-line text fields for new decks and new cards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{Input, Key, TextArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewDeck,
    NewCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Cancel,
    Edited,
}

#[derive(Debug)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<TextArea<'static>>,
    pub focus: usize,
}

fn field(placeholder: &str) -> TextArea<'static> {
    let mut ta = TextArea::default();
    ta.set_placeholder_text(placeholder.to_string());
    ta.set_cursor_line_style(ratatui::style::Style::default());
    ta
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::NewDeck => vec![field("Deck name")],
            FormKind::NewCard => vec![field("Front"), field("Back")],
        };
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::NewDeck => " New deck ",
            FormKind::NewCard => " New card ",
        }
    }

    pub fn label(&self, idx: usize) -> &'static str {
        match (self.kind, idx) {
            (FormKind::NewDeck, _) => "Name",
            (FormKind::NewCard, 0) => "Front",
            (FormKind::NewCard, _) => "Back",
        }
    }

    pub fn value(&self, idx: usize) -> String {
        self.fields
            .get(idx)
            .map(|f| f.lines().join("\n"))
            .unwrap_or_default()
    }

    /// Empty every field and move focus back to the first one.
    pub fn clear(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn handle(&mut self, key: &KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            _ => {
                if let Some(f) = self.fields.get_mut(self.focus) {
                    f.input(to_input(key));
                }
            }
        }
        FormEvent::Edited
    }
}

fn to_input(key: &KeyEvent) -> Input {
    let k = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => Key::Null,
    };
    Input {
        key: k,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

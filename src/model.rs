// ---------------- Data ----------------
// Deck / Card records as they are persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            front: front.into(),
            back: back.into(),
        }
    }
}

impl Deck {
    /// A fresh deck with an empty card sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Time-based base-36 prefix plus a random base-36 suffix.
pub fn new_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let random = Uuid::new_v4().as_u128() & ((1u128 << 52) - 1);
    format!("{}{}", to_base36(millis), to_base36(random))
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Trimmed text, or `None` when nothing but whitespace is left.
pub(crate) fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

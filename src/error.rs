//! Error types for the flashcard store, session and controllers.

use std::path::PathBuf;

use thiserror::Error;

use crate::router::View;

/// The main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// No deck with this id exists in the repository.
    #[error("deck not found: {id}")]
    DeckNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The deck exists but holds no card with this id.
    #[error("card {card_id} not found in deck {deck_id}")]
    CardNotFound {
        /// Deck that was searched.
        deck_id: String,
        /// The id that was looked up.
        card_id: String,
    },

    /// A card-level operation ran while no deck was open.
    #[error("no deck is open")]
    NoOpenDeck,

    /// A view transition was requested from a view that does not offer it.
    #[error("cannot {action} from the {from} view")]
    InvalidTransition {
        /// View that was active.
        from: View,
        /// The requested transition.
        action: &'static str,
    },

    /// Reading or writing the storage directory failed.
    #[error("storage error at {path}: {source}")]
    Storage {
        /// File that was being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// A specialized Result type for flashcard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_not_found_display() {
        let err = Error::DeckNotFound { id: "abc".into() };
        assert_eq!(err.to_string(), "deck not found: abc");
    }

    #[test]
    fn test_card_not_found_display() {
        let err = Error::CardNotFound {
            deck_id: "d1".into(),
            card_id: "c9".into(),
        };
        assert_eq!(err.to_string(), "card c9 not found in deck d1");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = Error::InvalidTransition {
            from: View::DeckList,
            action: "start study",
        };
        assert_eq!(err.to_string(), "cannot start study from the deck list view");
    }

    #[test]
    fn test_storage_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::storage("/tmp/x.json", io);
        assert!(err.to_string().contains("/tmp/x.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_json_from() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}

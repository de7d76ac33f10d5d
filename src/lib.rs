//! Deck/card flashcard study tool.
//!
//! The core ([`repository`], [`router`], [`session`], [`controller`],
//! [`view`]) is independent of the terminal; [`tui`] draws it with ratatui.

pub mod config;
pub mod controller;
pub mod error;
pub mod hit;
pub mod logging;
pub mod model;
pub mod repository;
pub mod router;
pub mod session;
pub mod store;
pub mod tui;
pub mod view;

pub use error::{Error, Result};
pub use model::{Card, Deck};
pub use session::Session;

//! User actions, one module per screen.
//!
//! Each function takes the [`Session`](crate::session::Session) explicitly,
//! applies the action to the repository or router, and leaves redrawing to
//! the caller.

pub mod card_list;
pub mod deck_list;
pub mod study;

//! Klondike: single-deck, single-draw solitaire.
//!
//! - Seven tableau columns dealt 1..=7 cards, top card face-up
//! - 24 cards left face-down in the stock
//! - Deal one card at a time to the waste, recycling without limit
//! - Build foundations up by suit from Ace, tableau down by alternating color
//! - Every move is undoable; the undo log exports to a portable form

mod game;

pub use game::{Klondike, KlondikeBuilder};

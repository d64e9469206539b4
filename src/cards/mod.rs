//! Card system: card values and the deck factory.
//!
//! ## Key Types
//!
//! - `Rank`, `Suit`, `Color`: card attributes with a total rank order
//! - `Card`: immutable card value with a visibility flag
//! - `Deck`: 52-card factory with explicit-RNG shuffle

pub mod card;
pub mod deck;

pub use card::{Card, Color, Rank, Suit};
pub use deck::Deck;

//! # rust-klondike
//!
//! A Klondike solitaire rules engine with an exact, serializable undo log.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every move either fully succeeds and
//!    records one undo turn, or fails with a specific error and changes
//!    nothing.
//!
//! 2. **Closed undo vocabulary**: inverses are values of a fixed enum
//!    (`UndoAction`), so a saved log can only ever replay the operations on
//!    the allow-list.
//!
//! 3. **Composition over inheritance**: piles never own undo state; each
//!    mutating call is handed the current `Turn` and appends its inverse.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: piles use `im-rs` vectors so a whole
//!   game clones in O(1) for snapshots and comparisons.
//!
//! - **Explicit Randomness**: deck shuffles take a seeded `GameRng`; the
//!   same seed always yields the same deal.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: card values and the deck factory
//! - `zones`: stock, waste, foundation, tableau
//! - `undo`: inverse actions, turns, the undo log and its export form
//! - `games`: the Klondike orchestrator
//!
//! ```
//! use rust_klondike::Klondike;
//!
//! let mut game = Klondike::new(42);
//! game.deal().unwrap();
//! assert_eq!(game.waste().len(), 1);
//!
//! game.undo().unwrap();
//! assert_eq!(game.stock().len(), 24);
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod undo;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    GameRng,
    KlondikeConfig, ScoringConfig,
    KlondikeError, Result,
    CARDS_PER_SUIT, DECK_SIZE, TABLEAU_COLUMNS,
};

pub use crate::cards::{Card, Color, Deck, Rank, Suit};

pub use crate::zones::{Deal, Foundation, Piles, Stock, Tableau, Waste};

pub use crate::undo::{ActionRecord, ArgValue, Turn, UndoAction, UndoLog, UndoOp};

pub use crate::games::{Klondike, KlondikeBuilder};

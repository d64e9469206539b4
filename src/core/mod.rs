//! Core engine types: RNG, configuration, errors.
//!
//! These are the building blocks shared by cards, piles, the undo log
//! and the orchestrator.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{KlondikeConfig, ScoringConfig, CARDS_PER_SUIT, DECK_SIZE, TABLEAU_COLUMNS};
pub use error::{KlondikeError, Result};
pub use rng::GameRng;

//! Game configuration types.
//!
//! Hosts configure a game at construction by providing:
//! - `ScoringConfig`: point deltas applied after successful moves
//! - `KlondikeConfig`: seed plus scoring
//!
//! Both are serde types with defaults, so a host can load them from
//! whatever format it already uses.

use serde::{Deserialize, Serialize};

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 7;

/// Cards per suit (Ace..King).
pub const CARDS_PER_SUIT: usize = 13;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Point deltas the orchestrator applies after a move succeeds.
///
/// Applied through `adjust_score`, so they are bookkeeping only and are
/// never reverted by `undo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Tableau card onto its foundation pile.
    pub tableau_to_foundation: i64,
    /// Waste card onto a tableau column.
    pub waste_to_tableau: i64,
    /// Waste card onto its foundation pile.
    pub waste_to_foundation: i64,
    /// Foundation card back onto a tableau column.
    pub foundation_to_tableau: i64,
    /// A concealed tableau card turned face-up.
    pub reveal: i64,
    /// Waste recycled into the stock.
    pub recycle: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tableau_to_foundation: 10,
            waste_to_tableau: 5,
            waste_to_foundation: 10,
            foundation_to_tableau: -15,
            reveal: 5,
            recycle: -100,
        }
    }
}

impl ScoringConfig {
    /// Scoring with every delta set to zero.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            tableau_to_foundation: 0,
            waste_to_tableau: 0,
            waste_to_foundation: 0,
            foundation_to_tableau: 0,
            reveal: 0,
            recycle: 0,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KlondikeConfig {
    /// Seed for the deck shuffle.
    pub seed: u64,

    /// Score deltas for moves.
    pub scoring: ScoringConfig,
}

impl KlondikeConfig {
    /// Create a configuration with the given seed and default scoring.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            scoring: ScoringConfig::default(),
        }
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }
}

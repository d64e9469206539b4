//! Pile system for card locations.
//!
//! Four pile kinds, each enforcing its own placement rules and recording
//! the inverse of every mutation into the `Turn` it is handed:
//!
//! - `Stock`: face-down draw pile
//! - `Waste`: face-up pile fed by the stock
//! - `Foundation`: four ascending same-suit piles
//! - `Tableau`: seven working columns
//!
//! `Piles` groups one of each; it is what undo actions replay against.

pub mod foundation;
pub mod stock;
pub mod tableau;

pub use foundation::Foundation;
pub use stock::{Deal, Stock, Waste};
pub use tableau::Tableau;

use rustc_hash::FxHashSet;

use crate::cards::{Card, Deck, Rank, Suit};
use crate::core::{KlondikeError, Result, DECK_SIZE, TABLEAU_COLUMNS};

/// One stock, one waste, one foundation, one tableau.
#[derive(Clone, Debug, Default)]
pub struct Piles {
    pub stock: Stock,
    pub waste: Waste,
    pub foundation: Foundation,
    pub tableau: Tableau,
}

impl Piles {
    /// Lay out a deck: column `i` gets `i + 1` cards dealt row by row with
    /// its top card face-up, the rest goes face-down to the stock.
    ///
    /// The deck must hold each of the 52 cards exactly once.
    pub fn deal_from(deck: Deck) -> Result<Self> {
        if !deck.is_complete() {
            return Err(KlondikeError::illegal(format!(
                "a game needs {} distinct cards, deck holds {}",
                DECK_SIZE,
                deck.len()
            )));
        }
        Ok(Self::lay_out(deck))
    }

    /// `deal_from` without the completeness check, for decks built by the
    /// crate itself.
    pub(crate) fn lay_out(mut deck: Deck) -> Self {
        let mut piles = Self::default();
        for row in 0..TABLEAU_COLUMNS {
            for column in row..TABLEAU_COLUMNS {
                if let Some(card) = deck.deal() {
                    piles.tableau.deal_onto(column, card);
                }
            }
        }
        piles.tableau.reveal_tops();

        // The stock top is the card the deck would have dealt next.
        let rest: Vec<Card> = std::iter::from_fn(|| deck.deal()).collect();
        for card in rest.into_iter().rev() {
            piles.stock.place(card);
        }
        piles
    }

    /// Every card in every pile.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.stock
            .cards()
            .iter()
            .chain(self.waste.cards().iter())
            .chain(self.foundation.iter())
            .chain(self.tableau.iter())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.stock.len() + self.waste.len() + self.foundation.len() + self.tableau.len()
    }

    /// Checks that the 52 cards are spread across the piles with no
    /// duplicate and no card missing.
    pub fn verify_conservation(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for card in self.iter() {
            if !seen.insert(*card) {
                return Err(KlondikeError::illegal(format!("{} appears twice", card)));
            }
        }
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let card = Card::new(rank, suit);
                if !seen.contains(&card) {
                    return Err(KlondikeError::illegal(format!("{} is missing", card)));
                }
            }
        }
        Ok(())
    }

    /// True if both hold the same cards in the same places with the same
    /// visibility.
    #[must_use]
    pub fn same_layout(&self, other: &Piles) -> bool {
        fn same<'a>(
            a: impl Iterator<Item = &'a Card>,
            b: impl Iterator<Item = &'a Card>,
        ) -> bool {
            a.map(|c| (*c, c.face_up)).eq(b.map(|c| (*c, c.face_up)))
        }

        same(self.stock.cards().iter(), other.stock.cards().iter())
            && same(self.waste.cards().iter(), other.waste.cards().iter())
            && Suit::ALL.iter().all(|&suit| {
                same(
                    self.foundation.pile(suit).iter(),
                    other.foundation.pile(suit).iter(),
                )
            })
            && (0..TABLEAU_COLUMNS).all(|column| {
                match (self.tableau.column(column), other.tableau.column(column)) {
                    (Some(a), Some(b)) => same(a.iter(), b.iter()),
                    _ => false,
                }
            })
    }
}

//! Stock and waste.
//!
//! The stock is a face-down draw pile; dealing turns its top card face-up
//! onto the waste. An empty stock is refilled from the waste (reversed,
//! turned face-down) before dealing.

use im::Vector;

use crate::cards::Card;
use crate::core::{KlondikeError, Result};
use crate::undo::{Turn, UndoAction};

/// Result of a successful deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deal {
    /// The card now on top of the waste.
    pub card: Card,
    /// True if the waste was recycled into the stock first.
    pub recycled: bool,
}

/// Face-down draw pile. The last card is the top.
#[derive(Clone, Debug, Default)]
pub struct Stock {
    cards: Vector<Card>,
}

impl Stock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Deal the top card onto `waste`, recycling the waste first if the
    /// stock is empty.
    pub fn deal(&mut self, waste: &mut Waste, turn: &mut Turn) -> Result<Deal> {
        let recycled = self.is_empty();
        if recycled {
            if waste.is_empty() {
                return Err(KlondikeError::illegal("no cards left to deal or recycle"));
            }
            self.cards = waste.cards.iter().rev().map(|c| c.concealed()).collect();
            waste.cards.clear();
            turn.record(UndoAction::StockUndoRecycle);
        }

        let card = self
            .cards
            .pop_back()
            .ok_or_else(|| KlondikeError::EmptyPile("stock".to_string()))?
            .revealed();
        waste.cards.push_back(card);
        turn.record(UndoAction::StockUndoDeal);
        Ok(Deal { card, recycled })
    }

    /// Escape hatch: empty the stock without recording anything.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Setup only: push a face-down card on top, bypassing the log.
    pub fn place(&mut self, card: Card) {
        self.cards.push_back(card.concealed());
    }

    /// Inverse of the single-card deal.
    pub(crate) fn undeal(&mut self, waste: &mut Waste) -> Result<()> {
        let card = waste
            .cards
            .pop_back()
            .ok_or_else(|| KlondikeError::record("waste is empty, nothing to undeal"))?;
        self.cards.push_back(card.concealed());
        Ok(())
    }

    /// Inverse of the recycle.
    pub(crate) fn unrecycle(&mut self, waste: &mut Waste) -> Result<()> {
        if !waste.is_empty() {
            return Err(KlondikeError::record(format!(
                "waste holds {} cards, cannot undo a recycle",
                waste.len()
            )));
        }
        waste.cards = self.cards.iter().rev().map(|c| c.revealed()).collect();
        self.cards.clear();
        Ok(())
    }
}

/// Face-up pile fed by the stock. The last card is the top.
#[derive(Clone, Debug, Default)]
pub struct Waste {
    cards: Vector<Card>,
}

impl Waste {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Remove and return the top card.
    pub fn get(&mut self, turn: &mut Turn) -> Result<Card> {
        let card = self
            .cards
            .pop_back()
            .ok_or_else(|| KlondikeError::EmptyPile("waste".to_string()))?;
        turn.record(UndoAction::WasteUndoGet { card });
        Ok(card)
    }

    /// Escape hatch: empty the waste without recording anything.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Inverse of `get`; also usable for setup.
    pub fn restore(&mut self, card: Card) {
        self.cards.push_back(card.revealed());
    }
}

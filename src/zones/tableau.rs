//! Tableau: seven working columns.
//!
//! Each column is a run of concealed cards with a run of face-up cards on
//! top. Only the face-up run moves. A run may land on an empty column if
//! its base is a King, otherwise on a face-up card one rank higher of the
//! opposite color. Taking the last face-up card off a column turns the new
//! top card face-up within the same turn.

use im::Vector;

use crate::cards::{Card, Rank};
use crate::core::{KlondikeError, Result, TABLEAU_COLUMNS};
use crate::undo::{Turn, UndoAction};

use super::Foundation;

#[derive(Clone, Debug, Default)]
pub struct Tableau {
    columns: [Vector<Card>; TABLEAU_COLUMNS],
}

impl Tableau {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All columns, bottom card first.
    #[must_use]
    pub fn columns(&self) -> &[Vector<Card>] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, column: usize) -> Option<&Vector<Card>> {
        self.columns.get(column)
    }

    #[must_use]
    pub fn top(&self, column: usize) -> Option<&Card> {
        self.column(column)?.back()
    }

    /// True if a run whose base is `card` may be placed on `column`.
    #[must_use]
    pub fn can_accept(&self, column: usize, card: &Card) -> bool {
        let Some(cards) = self.column(column) else {
            return false;
        };
        if card.is_concealed() {
            return false;
        }
        match cards.back() {
            None => card.rank == Rank::King,
            Some(top) => top.face_up && card.stacks_on(top),
        }
    }

    /// Index of the lowest face-up card, `None` for an empty or fully
    /// concealed column.
    #[must_use]
    pub fn run_start(&self, column: usize) -> Option<usize> {
        let cards = self.column(column)?;
        let concealed = cards.iter().rev().skip_while(|c| c.face_up).count();
        (concealed < cards.len()).then_some(concealed)
    }

    /// The maximal face-up suffix of `column`.
    #[must_use]
    pub fn top_face_up_run(&self, column: usize) -> Vec<Card> {
        match (self.column(column), self.run_start(column)) {
            (Some(cards), Some(start)) => cards.iter().skip(start).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// The top card of `column` if the foundation would take it.
    #[must_use]
    pub fn foundation_candidate(&self, column: usize, foundation: &Foundation) -> Option<Card> {
        self.top(column)
            .filter(|card| foundation.can_accept(card))
            .copied()
    }

    /// Checks that `index` starts a movable run in `column`.
    fn check_run(&self, column: usize, index: usize) -> Result<&Card> {
        let cards = self
            .column(column)
            .ok_or_else(|| KlondikeError::illegal(format!("no tableau column {}", column)))?;
        let card = cards.get(index).ok_or_else(|| {
            KlondikeError::illegal(format!(
                "column {} has no card {} ({} cards)",
                column,
                index,
                cards.len()
            ))
        })?;
        if card.is_concealed() {
            return Err(KlondikeError::illegal(format!(
                "card {} of column {} is face-down",
                index, column
            )));
        }
        Ok(card)
    }

    /// Remove the run from `index` to the top of `column`.
    ///
    /// Reveals the new top card if it is concealed.
    pub fn get(&mut self, column: usize, index: usize, turn: &mut Turn) -> Result<Vec<Card>> {
        self.check_run(column, index)?;

        let pile = &mut self.columns[column];
        let run = pile.split_off(index);
        let cards: Vec<Card> = run.into_iter().collect();
        turn.record(UndoAction::TableauUndoGet {
            column,
            cards: cards.clone(),
        });

        if let Some(top) = pile.back_mut() {
            if top.is_concealed() {
                *top = top.revealed();
                turn.record(UndoAction::TableauUndoReveal { column });
            }
        }
        Ok(cards)
    }

    /// Place a face-up run onto `column`.
    pub fn put(&mut self, column: usize, cards: Vec<Card>, turn: &mut Turn) -> Result<()> {
        let base = cards
            .first()
            .ok_or_else(|| KlondikeError::illegal("nothing to place"))?;
        if cards.iter().any(Card::is_concealed) {
            return Err(KlondikeError::ConcealedCard(
                "tableau runs must be revealed".to_string(),
            ));
        }
        if !self.can_accept(column, base) {
            return Err(KlondikeError::illegal(match self.top(column) {
                Some(top) => format!("{} cannot go on {} in column {}", base, top, column),
                None if column < TABLEAU_COLUMNS => {
                    format!("only a King may start empty column {}, got {}", column, base)
                }
                None => format!("no tableau column {}", column),
            }));
        }

        let count = cards.len();
        self.columns[column].extend(cards);
        turn.record(UndoAction::TableauUndoPut { column, count });
        Ok(())
    }

    /// Move the run starting at `index` of `source` onto `destination`.
    ///
    /// Fully validated before anything moves.
    pub fn move_run(
        &mut self,
        source: usize,
        index: usize,
        destination: usize,
        turn: &mut Turn,
    ) -> Result<()> {
        if source == destination {
            return Err(KlondikeError::illegal(format!(
                "column {} cannot move onto itself",
                source
            )));
        }
        let base = *self.check_run(source, index)?;
        if !self.can_accept(destination, &base) {
            return Err(KlondikeError::illegal(format!(
                "{} cannot move to column {}",
                base, destination
            )));
        }

        let cards = self.get(source, index, turn)?;
        self.put(destination, cards, turn)
    }

    /// Number of cards across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.columns.iter().flat_map(|column| column.iter())
    }

    /// Setup only: push a card as-is, bypassing rules and the log.
    pub fn place(&mut self, column: usize, card: Card) -> Result<()> {
        self.columns
            .get_mut(column)
            .ok_or_else(|| KlondikeError::illegal(format!("no tableau column {}", column)))?
            .push_back(card);
        Ok(())
    }

    /// Initial deal: push a face-down card onto `column` (< 7).
    pub(crate) fn deal_onto(&mut self, column: usize, card: Card) {
        self.columns[column].push_back(card.concealed());
    }

    /// Setup only: turn every column's top card face-up.
    pub(crate) fn reveal_tops(&mut self) {
        for column in &mut self.columns {
            if let Some(top) = column.back_mut() {
                *top = top.revealed();
            }
        }
    }

    /// Inverse of `get`.
    pub(crate) fn restore(&mut self, column: usize, cards: &[Card]) -> Result<()> {
        let pile = self
            .columns
            .get_mut(column)
            .ok_or_else(|| KlondikeError::record(format!("no tableau column {}", column)))?;
        pile.extend(cards.iter().map(|card| card.revealed()));
        Ok(())
    }

    /// Inverse of `put`.
    pub(crate) fn remove(&mut self, column: usize, count: usize) -> Result<()> {
        let pile = self
            .columns
            .get_mut(column)
            .ok_or_else(|| KlondikeError::record(format!("no tableau column {}", column)))?;
        if count > pile.len() {
            return Err(KlondikeError::record(format!(
                "column {} holds {} cards, cannot remove {}",
                column,
                pile.len(),
                count
            )));
        }
        let keep = pile.len() - count;
        pile.truncate(keep);
        Ok(())
    }

    /// Inverse of the automatic reveal.
    pub(crate) fn conceal_top(&mut self, column: usize) -> Result<()> {
        let top = self
            .columns
            .get_mut(column)
            .and_then(Vector::back_mut)
            .ok_or_else(|| KlondikeError::record(format!("column {} has no card to conceal", column)))?;
        *top = top.concealed();
        Ok(())
    }
}

//! Klondike game orchestrator.

use crate::cards::{Card, Deck, Suit};
use crate::core::{GameRng, KlondikeConfig, KlondikeError, Result, ScoringConfig, TABLEAU_COLUMNS};
use crate::undo::{ActionRecord, Turn, UndoLog};
use crate::zones::{Foundation, Piles, Stock, Tableau, Waste};

/// Where a card moved from or to, for scoring and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    TableauToFoundation,
    TableauToTableau,
    WasteToFoundation,
    WasteToTableau,
    FoundationToTableau,
}

/// A single Klondike session.
///
/// Owns the piles, the score and the undo log. Every move either succeeds
/// and commits exactly one turn, or fails and leaves piles and log as they
/// were.
#[derive(Clone, Debug)]
pub struct Klondike {
    config: KlondikeConfig,
    piles: Piles,
    log: UndoLog,
    score: i64,
    shuffled: bool,
}

/// Builder for creating a Klondike game.
#[derive(Clone, Debug, Default)]
pub struct KlondikeBuilder {
    scoring: ScoringConfig,
}

impl KlondikeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Build a game from a shuffled deck.
    pub fn build(self, seed: u64) -> Klondike {
        let config = KlondikeConfig::new(seed).with_scoring(self.scoring);
        Klondike::from_config(config)
    }

    /// Build a game from an explicit deck order (last card dealt first).
    ///
    /// Fails unless the deck holds each of the 52 cards exactly once.
    pub fn build_with_deck(self, deck: Deck) -> Result<Klondike> {
        let shuffled = deck.is_shuffled();
        let piles = Piles::deal_from(deck)?;
        Ok(Klondike {
            config: KlondikeConfig::new(0).with_scoring(self.scoring),
            piles,
            log: UndoLog::new(),
            score: 0,
            shuffled,
        })
    }
}

impl Klondike {
    /// Shorthand for a default-scored game from `seed`.
    pub fn new(seed: u64) -> Self {
        KlondikeBuilder::new().build(seed)
    }

    pub fn builder() -> KlondikeBuilder {
        KlondikeBuilder::new()
    }

    pub fn from_config(config: KlondikeConfig) -> Self {
        let mut rng = GameRng::new(config.seed).for_context("deck");
        let piles = Piles::lay_out(Deck::shuffled(&mut rng));
        log::debug!("new game, seed {}", config.seed);
        Self {
            config,
            piles,
            log: UndoLog::new(),
            score: 0,
            shuffled: true,
        }
    }

    // === Inspection ===

    pub fn config(&self) -> &KlondikeConfig {
        &self.config
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    /// Direct access to the piles. Changes made here bypass move rules and
    /// the undo log; meant for setup and tests.
    pub fn piles_mut(&mut self) -> &mut Piles {
        &mut self.piles
    }

    pub fn stock(&self) -> &Stock {
        &self.piles.stock
    }

    pub fn waste(&self) -> &Waste {
        &self.piles.waste
    }

    pub fn foundation(&self) -> &Foundation {
        &self.piles.foundation
    }

    pub fn tableau(&self) -> &Tableau {
        &self.piles.tableau
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.log
    }

    /// True once all 52 cards are on the foundation.
    pub fn is_won(&self) -> bool {
        self.piles.foundation.is_complete()
    }

    pub fn verify_conservation(&self) -> Result<()> {
        self.piles.verify_conservation()
    }

    // === Moves ===

    /// Deal one card from the stock to the waste, recycling the waste if
    /// the stock is empty.
    pub fn deal(&mut self) -> Result<()> {
        let deal = self.transact(|piles, turn| piles.stock.deal(&mut piles.waste, turn))?;
        if deal.recycled {
            log::debug!("recycled waste into stock");
            self.adjust_score(self.config.scoring.recycle);
        }
        log::debug!("dealt {}", deal.card);
        Ok(())
    }

    /// General tableau move entry point.
    ///
    /// - No `pile`: auto-play one card to the foundation.
    /// - `pile` only: send the selected card to its foundation pile if it is
    ///   the top card and fits, else to the first tableau column that takes
    ///   the run.
    /// - `pile` and `destination`: exactly that tableau move.
    ///
    /// `card` indexes into the column; negative values count from the top
    /// (`-1` is the top card). It may be omitted only for a one-card column.
    pub fn select_tableau(
        &mut self,
        pile: Option<isize>,
        card: Option<isize>,
        destination: Option<isize>,
    ) -> Result<()> {
        let Some(pile) = pile else {
            return self.seek_tableau_to_foundation();
        };
        let source = column_index(pile)?;
        let destination = destination.map(column_index).transpose()?;
        if destination == Some(source) {
            return Err(KlondikeError::illegal(format!(
                "pile {} equals destination",
                source
            )));
        }
        let index = self.card_index(source, card)?;

        match destination {
            Some(destination) => self.move_tableau(source, index, destination),
            None => self.auto_move_tableau(source, index),
        }
    }

    /// Move the first foundation candidate found, scanning tableau columns
    /// in order and then the waste.
    pub fn seek_tableau_to_foundation(&mut self) -> Result<()> {
        let Piles {
            waste,
            foundation,
            tableau,
            ..
        } = &self.piles;
        let candidate = (0..TABLEAU_COLUMNS)
            .find(|&column| tableau.foundation_candidate(column, foundation).is_some());
        let waste_fits = waste.top().map_or(false, |card| foundation.can_accept(card));

        match candidate {
            Some(column) => self.tableau_to_foundation(column),
            None if waste_fits => self.waste_to_foundation(),
            None => Err(KlondikeError::illegal("no foundation candidate")),
        }
    }

    /// Move the waste top card to `destination`, or with no destination to
    /// its foundation pile if it fits, else the first column that takes it.
    pub fn select_waste(&mut self, destination: Option<isize>) -> Result<()> {
        let card = *self
            .piles
            .waste
            .top()
            .ok_or_else(|| KlondikeError::EmptyPile("waste".to_string()))?;

        let destination = match destination {
            Some(destination) => {
                let destination = column_index(destination)?;
                if !self.piles.tableau.can_accept(destination, &card) {
                    return Err(KlondikeError::illegal(format!(
                        "{} cannot move to column {}",
                        card, destination
                    )));
                }
                destination
            }
            None if self.piles.foundation.can_accept(&card) => return self.waste_to_foundation(),
            None => self
                .first_accepting_column(&card, None)
                .ok_or_else(|| KlondikeError::illegal(format!("no place for {}", card)))?,
        };

        self.transact(|piles, turn| {
            let card = piles.waste.get(turn)?;
            piles.tableau.put(destination, vec![card], turn)
        })?;
        self.score_route(Route::WasteToTableau);
        log::debug!("{} from waste to column {}", card, destination);
        Ok(())
    }

    /// Move the top card of a foundation pile back to the tableau.
    pub fn select_foundation(&mut self, suit: Suit, destination: Option<isize>) -> Result<()> {
        let card = *self
            .piles
            .foundation
            .top(suit)
            .ok_or_else(|| KlondikeError::EmptyPile(format!("no foundation cards for {}", suit)))?;

        let destination = match destination {
            Some(destination) => {
                let destination = column_index(destination)?;
                if !self.piles.tableau.can_accept(destination, &card) {
                    return Err(KlondikeError::illegal(format!(
                        "{} cannot move to column {}",
                        card, destination
                    )));
                }
                destination
            }
            None => self
                .first_accepting_column(&card, None)
                .ok_or_else(|| KlondikeError::illegal(format!("no place for {}", card)))?,
        };

        self.transact(|piles, turn| {
            let card = piles.foundation.get(suit, turn)?;
            piles.tableau.put(destination, vec![card], turn)
        })?;
        self.score_route(Route::FoundationToTableau);
        log::debug!("{} from foundation to column {}", card, destination);
        Ok(())
    }

    /// Add `delta` to the score. Never recorded in the undo log.
    pub fn adjust_score(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Undo the most recent turn. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let undone = self.log.undo(&mut self.piles)?;
        if undone {
            log::debug!("undid turn, {} remain", self.log.len());
        }
        Ok(undone)
    }

    /// Portable copy of the undo log.
    pub fn export_undo_log(&self) -> Vec<Vec<ActionRecord>> {
        self.log.export()
    }

    /// Replace the undo log with one rebuilt from `export_undo_log` output.
    ///
    /// On error the current log is kept.
    pub fn import_undo_log(&mut self, turns: &[Vec<ActionRecord>]) -> Result<()> {
        self.log = UndoLog::import(turns)?;
        Ok(())
    }

    /// Replace the undo log, e.g. one decoded with `UndoLog::from_bytes`.
    pub fn replace_undo_log(&mut self, log: UndoLog) {
        self.log = log;
    }

    // === Internals ===

    /// Run one move against a fresh turn.
    ///
    /// On success the turn is committed. On failure the piles are reset to
    /// the snapshot taken before the move started.
    fn transact<T>(&mut self, f: impl FnOnce(&mut Piles, &mut Turn) -> Result<T>) -> Result<T> {
        let snapshot = self.piles.clone();
        let mut turn = Turn::new();
        match f(&mut self.piles, &mut turn) {
            Ok(value) => {
                let reveals = turn.reveals() as i64;
                self.log.commit(turn);
                self.adjust_score(self.config.scoring.reveal * reveals);
                Ok(value)
            }
            Err(err) => {
                log::debug!("move rejected after {} primitives: {}", turn.len(), err);
                self.piles = snapshot;
                Err(err)
            }
        }
    }

    fn score_route(&mut self, route: Route) {
        let scoring = self.config.scoring;
        let delta = match route {
            Route::TableauToFoundation => scoring.tableau_to_foundation,
            Route::TableauToTableau => 0,
            Route::WasteToFoundation => scoring.waste_to_foundation,
            Route::WasteToTableau => scoring.waste_to_tableau,
            Route::FoundationToTableau => scoring.foundation_to_tableau,
        };
        self.adjust_score(delta);
    }

    /// Resolve a `card_num` argument into an absolute index.
    fn card_index(&self, column: usize, card: Option<isize>) -> Result<usize> {
        let len = self.piles.tableau.column(column).map_or(0, |c| c.len());
        let index = match card {
            None if len == 1 => Some(0),
            None => {
                return Err(KlondikeError::illegal(format!(
                    "column {} holds {} cards, pick one",
                    column, len
                )))
            }
            Some(n) if n < 0 => len.checked_sub(n.unsigned_abs()),
            Some(n) => Some(n.unsigned_abs()).filter(|&i| i < len),
        };
        index.ok_or_else(|| {
            KlondikeError::illegal(format!("column {} has no card {:?}", column, card))
        })
    }

    fn first_accepting_column(&self, card: &Card, skip: Option<usize>) -> Option<usize> {
        (0..TABLEAU_COLUMNS)
            .filter(|&column| Some(column) != skip)
            .find(|&column| self.piles.tableau.can_accept(column, card))
    }

    fn auto_move_tableau(&mut self, source: usize, index: usize) -> Result<()> {
        let column = self
            .piles
            .tableau
            .column(source)
            .ok_or_else(|| KlondikeError::illegal(format!("no tableau column {}", source)))?;
        let card = column[index];
        if card.is_concealed() {
            return Err(KlondikeError::illegal(format!(
                "card {} of column {} is face-down",
                index, source
            )));
        }
        let is_top = index + 1 == column.len();

        if is_top && self.piles.foundation.can_accept(&card) {
            return self.tableau_to_foundation(source);
        }
        match self.first_accepting_column(&card, Some(source)) {
            Some(destination) => self.move_tableau(source, index, destination),
            None => Err(KlondikeError::illegal(format!(
                "no legal destination for {}",
                card
            ))),
        }
    }

    fn move_tableau(&mut self, source: usize, index: usize, destination: usize) -> Result<()> {
        self.transact(|piles, turn| piles.tableau.move_run(source, index, destination, turn))?;
        self.score_route(Route::TableauToTableau);
        log::debug!(
            "column {} card {} to column {}",
            source,
            index,
            destination
        );
        Ok(())
    }

    fn tableau_to_foundation(&mut self, column: usize) -> Result<()> {
        let card = self.transact(|piles, turn| {
            let index = piles
                .tableau
                .column(column)
                .map_or(0, |c| c.len())
                .checked_sub(1)
                .ok_or_else(|| KlondikeError::EmptyPile(format!("tableau column {}", column)))?;
            let mut cards = piles.tableau.get(column, index, turn)?;
            let card = cards.remove(0);
            piles.foundation.put(card, turn)?;
            Ok(card)
        })?;
        self.score_route(Route::TableauToFoundation);
        log::debug!("{} from column {} to foundation", card, column);
        Ok(())
    }

    fn waste_to_foundation(&mut self) -> Result<()> {
        let card = self.transact(|piles, turn| {
            let card = piles.waste.get(turn)?;
            piles.foundation.put(card, turn)?;
            Ok(card)
        })?;
        self.score_route(Route::WasteToFoundation);
        log::debug!("{} from waste to foundation", card);
        Ok(())
    }
}

/// Validate a player-supplied column number.
fn column_index(pile: isize) -> Result<usize> {
    usize::try_from(pile)
        .ok()
        .filter(|&column| column < TABLEAU_COLUMNS)
        .ok_or_else(|| KlondikeError::illegal(format!("no tableau pile {}", pile)))
}

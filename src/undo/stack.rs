//! Turns and the undo log.
//!
//! A `Turn` collects the inverse actions emitted while one player-visible
//! move runs. Piles receive the turn as a `&mut` parameter and append to it;
//! they never own log state themselves. The `UndoLog` is a stack of
//! committed turns, undone last-in-first-out, and each turn replays its own
//! actions last-in-first-out as well.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{KlondikeError, Result};
use crate::zones::Piles;

use super::action::{ActionRecord, UndoAction};

/// Inverse actions recorded during one move.
///
/// SmallVec keeps the common case (one to four primitives) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    actions: SmallVec<[UndoAction; 4]>,
}

impl Turn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inverse action.
    pub fn record(&mut self, action: UndoAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Actions in the order they were recorded.
    #[must_use]
    pub fn actions(&self) -> &[UndoAction] {
        &self.actions
    }

    /// Number of tableau cards turned face-up during this turn.
    #[must_use]
    pub fn reveals(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, UndoAction::TableauUndoReveal { .. }))
            .count()
    }

    /// Replay the inverses, most recent first.
    ///
    /// All-or-nothing: if any inverse does not fit, the piles are put back
    /// exactly as they were before the call.
    pub fn revert(&self, piles: &mut Piles) -> Result<()> {
        let snapshot = piles.clone();
        self.actions
            .iter()
            .rev()
            .try_for_each(|action| action.revert(piles))
            .map_err(|err| {
                *piles = snapshot;
                err
            })
    }

    fn export(&self) -> Vec<ActionRecord> {
        self.actions.iter().map(UndoAction::to_record).collect()
    }

    fn import(records: &[ActionRecord]) -> Result<Self> {
        let actions = records
            .iter()
            .map(UndoAction::from_record)
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self { actions })
    }
}

/// Stack of committed turns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoLog {
    turns: Vec<Turn>,
}

impl UndoLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a turn. Empty turns are dropped.
    pub fn commit(&mut self, turn: Turn) {
        if !turn.is_empty() {
            self.turns.push(turn);
        }
    }

    /// Undo the most recent turn.
    ///
    /// Returns `Ok(false)` when the log is empty. If the turn does not fit
    /// the piles, both the piles and the log are left untouched.
    pub fn undo(&mut self, piles: &mut Piles) -> Result<bool> {
        let Some(turn) = self.turns.pop() else {
            return Ok(false);
        };
        if let Err(err) = turn.revert(piles) {
            log::warn!("undo rejected, turn kept: {}", err);
            self.turns.push(turn);
            return Err(err);
        }
        Ok(true)
    }

    /// Number of committed turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Portable form: one record list per turn, oldest turn first.
    #[must_use]
    pub fn export(&self) -> Vec<Vec<ActionRecord>> {
        self.turns.iter().map(Turn::export).collect()
    }

    /// Rebuild a log from `export` output.
    ///
    /// All-or-nothing: the first bad record rejects the whole log.
    pub fn import(turns: &[Vec<ActionRecord>]) -> Result<Self> {
        let turns = turns
            .iter()
            .map(|records| Turn::import(records))
            .collect::<Result<Vec<_>>>()
            .map_err(|err| {
                log::warn!("rejected undo log import: {}", err);
                err
            })?;
        Ok(Self {
            turns: turns.into_iter().filter(|t| !t.is_empty()).collect(),
        })
    }

    /// Compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.turns)
            .map_err(|err| KlondikeError::record(format!("encode failed: {}", err)))
    }

    /// Decode `to_bytes` output. Every action is structurally validated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let turns: Vec<Turn> = bincode::deserialize(bytes)
            .map_err(|err| KlondikeError::record(format!("decode failed: {}", err)))?;
        for turn in &turns {
            turn.actions.iter().try_for_each(UndoAction::validate)?;
        }
        Ok(Self { turns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};
    use crate::undo::ArgValue;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    /// Waste holds 5♣ then 6♦; foundation clubs holds A♣..4♣.
    fn fixture() -> Piles {
        let mut piles = Piles::default();
        for token in ["A♣", "2♣", "3♣", "4♣"] {
            piles.foundation.restore(card(token)).unwrap();
        }
        piles.waste.restore(card("5♣"));
        piles.waste.restore(card("6♦"));
        piles
    }

    #[test]
    fn test_empty_turn_is_not_committed() {
        let mut log = UndoLog::new();
        log.commit(Turn::new());
        assert!(log.is_empty());
    }

    #[test]
    fn test_undo_empty_log_is_noop() {
        let mut log = UndoLog::new();
        let mut piles = fixture();
        assert!(!log.undo(&mut piles).unwrap());
        assert!(piles.same_layout(&fixture()));
    }

    #[test]
    fn test_turn_replays_lifo() {
        let mut piles = fixture();
        let before = piles.clone();
        let mut turn = Turn::new();

        // Move 6♦ off, then 5♣ to the foundation.
        let six = piles.waste.get(&mut turn).unwrap();
        let five = piles.waste.get(&mut turn).unwrap();
        piles.foundation.put(five, &mut turn).unwrap();
        assert_eq!(six, card("6♦"));
        assert_eq!(turn.len(), 3);

        let mut log = UndoLog::new();
        log.commit(turn);
        assert!(log.undo(&mut piles).unwrap());

        assert!(piles.same_layout(&before));
        assert_eq!(piles.waste.top(), Some(&card("6♦")));
        assert!(log.is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut piles = fixture();
        let mut log = UndoLog::new();

        let mut turn = Turn::new();
        let six = piles.waste.get(&mut turn).unwrap();
        log.commit(turn);
        let mut turn = Turn::new();
        let five = piles.waste.get(&mut turn).unwrap();
        piles.foundation.put(five, &mut turn).unwrap();
        log.commit(turn);

        let exported = log.export();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0][0].operation, "waste.undo_get");
        assert_eq!(exported[0][0].args, vec![ArgValue::Text(six.to_string())]);

        let mut imported = UndoLog::import(&exported).unwrap();
        assert_eq!(imported, log);

        let mut other = piles.clone();
        while log.undo(&mut piles).unwrap() {}
        while imported.undo(&mut other).unwrap() {}
        assert!(piles.same_layout(&other));
        assert!(piles.same_layout(&fixture()));
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let good = UndoAction::StockUndoDeal.to_record();
        let bad = ActionRecord {
            operation: "stock.shuffle".into(),
            args: vec![],
        };
        let result = UndoLog::import(&[vec![good], vec![bad]]);
        assert!(matches!(result, Err(KlondikeError::InvalidRecord(_))));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut log = UndoLog::new();
        let mut turn = Turn::new();
        turn.record(UndoAction::TableauUndoReveal { column: 3 });
        turn.record(UndoAction::TableauUndoGet {
            column: 3,
            cards: vec![card("7♠"), card("6♥")],
        });
        log.commit(turn);

        let bytes = log.to_bytes().unwrap();
        assert_eq!(UndoLog::from_bytes(&bytes).unwrap(), log);
        assert!(UndoLog::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_bytes_reject_out_of_range_column() {
        let mut log = UndoLog::new();
        let mut turn = Turn::new();
        turn.record(UndoAction::TableauUndoReveal { column: 12 });
        log.commit(turn);

        let bytes = log.to_bytes().unwrap();
        assert!(matches!(
            UndoLog::from_bytes(&bytes),
            Err(KlondikeError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_failed_undo_keeps_piles_and_turn() {
        let mut piles = fixture();
        let before = piles.clone();

        // Replayed last-first: the waste restore applies, then the hearts
        // pile turns out to be empty.
        let mut turn = Turn::new();
        turn.record(UndoAction::FoundationUndoPut { suit: Suit::Hearts });
        turn.record(UndoAction::WasteUndoGet { card: card("7♥") });
        let mut log = UndoLog::new();
        log.commit(turn.clone());

        let result = log.undo(&mut piles);

        assert!(matches!(result, Err(KlondikeError::InvalidRecord(_))));
        assert!(piles.same_layout(&before));
        assert_eq!(piles.waste.len(), 2);
        assert_eq!(log.turns(), &[turn]);
    }

    #[test]
    fn test_reveals_counted() {
        let mut turn = Turn::new();
        turn.record(UndoAction::TableauUndoGet { column: 1, cards: vec![card("2♠")] });
        turn.record(UndoAction::TableauUndoReveal { column: 1 });
        assert_eq!(turn.reveals(), 1);
    }
}

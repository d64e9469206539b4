//! Primitive inverse actions and their portable record form.
//!
//! Every mutation a pile performs during a move is paired with one
//! `UndoAction` describing how to put things back. The set of actions is
//! closed: each variant maps to exactly one handler on the owning pile,
//! fixed at compile time.
//!
//! For persistence an action converts to an `ActionRecord`
//! `{operation, args}` where `operation` is one of the names in
//! `UndoOp::ALL` and `args` are plain strings/integers (cards and suits as
//! their text tokens). Importing only ever resolves names against that
//! allow-list.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::core::{KlondikeError, Result, TABLEAU_COLUMNS};
use crate::zones::Piles;

/// Names of the replayable operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UndoOp {
    FoundationUndoGet,
    FoundationUndoPut,
    TableauUndoGet,
    TableauUndoPut,
    TableauUndoReveal,
    WasteUndoGet,
    StockUndoDeal,
    StockUndoRecycle,
}

impl UndoOp {
    /// The complete allow-list.
    pub const ALL: [UndoOp; 8] = [
        UndoOp::FoundationUndoGet,
        UndoOp::FoundationUndoPut,
        UndoOp::TableauUndoGet,
        UndoOp::TableauUndoPut,
        UndoOp::TableauUndoReveal,
        UndoOp::WasteUndoGet,
        UndoOp::StockUndoDeal,
        UndoOp::StockUndoRecycle,
    ];

    /// Serialized operation name, `<owner>.<operation>`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UndoOp::FoundationUndoGet => "foundation.undo_get",
            UndoOp::FoundationUndoPut => "foundation.undo_put",
            UndoOp::TableauUndoGet => "tableau.undo_get",
            UndoOp::TableauUndoPut => "tableau.undo_put",
            UndoOp::TableauUndoReveal => "tableau.undo_reveal",
            UndoOp::WasteUndoGet => "waste.undo_get",
            UndoOp::StockUndoDeal => "stock.undo_deal",
            UndoOp::StockUndoRecycle => "stock.undo_recycle",
        }
    }

    /// Resolve a serialized name. Anything off the allow-list is `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

impl std::fmt::Display for UndoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One primitive inverse action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoAction {
    /// Put `card` back on top of its foundation pile.
    FoundationUndoGet { card: Card },
    /// Remove the top card of the `suit` foundation pile.
    FoundationUndoPut { suit: Suit },
    /// Append face-up `cards` back onto `column`.
    TableauUndoGet { column: usize, cards: Vec<Card> },
    /// Remove the last `count` cards from `column`.
    TableauUndoPut { column: usize, count: usize },
    /// Turn the top card of `column` face-down again.
    TableauUndoReveal { column: usize },
    /// Put `card` back on top of the waste.
    WasteUndoGet { card: Card },
    /// Move the waste top card back onto the stock, face-down.
    StockUndoDeal,
    /// Move the whole stock back to the waste, reversed and face-up.
    StockUndoRecycle,
}

impl UndoAction {
    #[must_use]
    pub fn op(&self) -> UndoOp {
        match self {
            UndoAction::FoundationUndoGet { .. } => UndoOp::FoundationUndoGet,
            UndoAction::FoundationUndoPut { .. } => UndoOp::FoundationUndoPut,
            UndoAction::TableauUndoGet { .. } => UndoOp::TableauUndoGet,
            UndoAction::TableauUndoPut { .. } => UndoOp::TableauUndoPut,
            UndoAction::TableauUndoReveal { .. } => UndoOp::TableauUndoReveal,
            UndoAction::WasteUndoGet { .. } => UndoOp::WasteUndoGet,
            UndoAction::StockUndoDeal => UndoOp::StockUndoDeal,
            UndoAction::StockUndoRecycle => UndoOp::StockUndoRecycle,
        }
    }

    /// Apply this inverse to the piles.
    ///
    /// Bypasses move validation and records nothing. Fails with
    /// `InvalidRecord` when the piles are not in a shape the action can
    /// apply to (e.g. a log replayed against the wrong game).
    pub fn revert(&self, piles: &mut Piles) -> Result<()> {
        log::trace!("revert {:?}", self);
        match self {
            UndoAction::FoundationUndoGet { card } => piles.foundation.restore(*card),
            UndoAction::FoundationUndoPut { suit } => piles.foundation.remove_top(*suit).map(drop),
            UndoAction::TableauUndoGet { column, cards } => piles.tableau.restore(*column, cards),
            UndoAction::TableauUndoPut { column, count } => piles.tableau.remove(*column, *count),
            UndoAction::TableauUndoReveal { column } => piles.tableau.conceal_top(*column),
            UndoAction::WasteUndoGet { card } => {
                piles.waste.restore(*card);
                Ok(())
            }
            UndoAction::StockUndoDeal => piles.stock.undeal(&mut piles.waste),
            UndoAction::StockUndoRecycle => piles.stock.unrecycle(&mut piles.waste),
        }
    }

    /// Structural checks that do not depend on pile contents.
    pub fn validate(&self) -> Result<()> {
        let column = match self {
            UndoAction::TableauUndoGet { column, cards } => {
                if cards.is_empty() {
                    return Err(KlondikeError::record("tableau.undo_get needs at least one card"));
                }
                Some(*column)
            }
            UndoAction::TableauUndoPut { column, count } => {
                if *count == 0 {
                    return Err(KlondikeError::record("tableau.undo_put count must be positive"));
                }
                Some(*column)
            }
            UndoAction::TableauUndoReveal { column } => Some(*column),
            _ => None,
        };
        match column {
            Some(column) if column >= TABLEAU_COLUMNS => {
                Err(KlondikeError::record(format!("no tableau column {}", column)))
            }
            _ => Ok(()),
        }
    }

    /// Portable form.
    #[must_use]
    pub fn to_record(&self) -> ActionRecord {
        let args = match self {
            UndoAction::FoundationUndoGet { card } => {
                vec![ArgValue::text(card.suit), ArgValue::text(card)]
            }
            UndoAction::FoundationUndoPut { suit } => vec![ArgValue::text(suit)],
            UndoAction::TableauUndoGet { column, cards } => std::iter::once(ArgValue::int(*column))
                .chain(cards.iter().map(ArgValue::text))
                .collect(),
            UndoAction::TableauUndoPut { column, count } => {
                vec![ArgValue::int(*column), ArgValue::int(*count)]
            }
            UndoAction::TableauUndoReveal { column } => vec![ArgValue::int(*column)],
            UndoAction::WasteUndoGet { card } => vec![ArgValue::text(card)],
            UndoAction::StockUndoDeal | UndoAction::StockUndoRecycle => Vec::new(),
        };
        ActionRecord {
            operation: self.op().name().to_string(),
            args,
        }
    }

    /// Rebuild an action from its portable form.
    ///
    /// The operation name must be on the allow-list and the arguments must
    /// match that operation's shape exactly.
    pub fn from_record(record: &ActionRecord) -> Result<Self> {
        let op = UndoOp::from_name(&record.operation).ok_or_else(|| {
            KlondikeError::record(format!("operation {:?} is not replayable", record.operation))
        })?;
        let args = Args {
            op,
            values: &record.args,
        };

        let action = match op {
            UndoOp::FoundationUndoGet => {
                args.arity(2)?;
                let suit: Suit = args.text(0)?.parse()?;
                let card: Card = args.text(1)?.parse()?;
                if card.suit != suit {
                    return Err(KlondikeError::record(format!(
                        "{}: card {} is not of suit {}",
                        op, card, suit
                    )));
                }
                UndoAction::FoundationUndoGet { card }
            }
            UndoOp::FoundationUndoPut => {
                args.arity(1)?;
                UndoAction::FoundationUndoPut {
                    suit: args.text(0)?.parse()?,
                }
            }
            UndoOp::TableauUndoGet => {
                if args.values.len() < 2 {
                    return Err(KlondikeError::record(format!(
                        "{} takes a column and at least one card",
                        op
                    )));
                }
                let cards = (1..args.values.len())
                    .map(|i| args.text(i)?.parse::<Card>())
                    .collect::<Result<Vec<_>>>()?;
                UndoAction::TableauUndoGet {
                    column: args.int(0)?,
                    cards,
                }
            }
            UndoOp::TableauUndoPut => {
                args.arity(2)?;
                UndoAction::TableauUndoPut {
                    column: args.int(0)?,
                    count: args.int(1)?,
                }
            }
            UndoOp::TableauUndoReveal => {
                args.arity(1)?;
                UndoAction::TableauUndoReveal { column: args.int(0)? }
            }
            UndoOp::WasteUndoGet => {
                args.arity(1)?;
                UndoAction::WasteUndoGet {
                    card: args.text(0)?.parse()?,
                }
            }
            UndoOp::StockUndoDeal => {
                args.arity(0)?;
                UndoAction::StockUndoDeal
            }
            UndoOp::StockUndoRecycle => {
                args.arity(0)?;
                UndoAction::StockUndoRecycle
            }
        };

        action.validate()?;
        Ok(action)
    }
}

/// A literal argument in a portable record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Text(String),
}

impl ArgValue {
    fn int(value: usize) -> Self {
        // Column indices and run lengths are tiny.
        ArgValue::Int(value as i64)
    }

    fn text(value: impl ToString) -> Self {
        ArgValue::Text(value.to_string())
    }
}

/// Portable form of one primitive inverse action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Operation name from the allow-list.
    pub operation: String,
    /// Literal arguments.
    pub args: Vec<ArgValue>,
}

struct Args<'a> {
    op: UndoOp,
    values: &'a [ArgValue],
}

impl Args<'_> {
    fn arity(&self, expected: usize) -> Result<()> {
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(KlondikeError::record(format!(
                "{} takes {} arguments, got {}",
                self.op,
                expected,
                self.values.len()
            )))
        }
    }

    fn text(&self, i: usize) -> Result<&str> {
        match self.values.get(i) {
            Some(ArgValue::Text(s)) => Ok(s),
            other => Err(KlondikeError::record(format!(
                "{} argument {} must be a token, got {:?}",
                self.op, i, other
            ))),
        }
    }

    fn int(&self, i: usize) -> Result<usize> {
        match self.values.get(i) {
            Some(ArgValue::Int(n)) => usize::try_from(*n).map_err(|_| {
                KlondikeError::record(format!("{} argument {} is negative", self.op, i))
            }),
            other => Err(KlondikeError::record(format!(
                "{} argument {} must be an integer, got {:?}",
                self.op, i, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    #[test]
    fn test_allow_list_names_are_unique() {
        for op in UndoOp::ALL {
            assert_eq!(UndoOp::from_name(op.name()), Some(op));
        }
        assert_eq!(UndoOp::from_name("game.adjust_score"), None);
        assert_eq!(UndoOp::from_name("__class__"), None);
    }

    #[test]
    fn test_record_shape() {
        let action = UndoAction::FoundationUndoGet { card: card("Q♥") };
        let record = action.to_record();
        assert_eq!(record.operation, "foundation.undo_get");
        assert_eq!(
            record.args,
            vec![ArgValue::Text("♥".into()), ArgValue::Text("Q♥".into())]
        );

        let action = UndoAction::TableauUndoGet {
            column: 3,
            cards: vec![card("9♣"), card("8♦")],
        };
        let record = action.to_record();
        assert_eq!(record.operation, "tableau.undo_get");
        assert_eq!(
            record.args,
            vec![
                ArgValue::Int(3),
                ArgValue::Text("9♣".into()),
                ArgValue::Text("8♦".into())
            ]
        );
        assert_eq!(UndoAction::from_record(&record).unwrap(), action);
    }

    #[test]
    fn test_every_variant_survives_record_form() {
        let actions = vec![
            UndoAction::FoundationUndoGet { card: Card::new(Rank::Two, Suit::Clubs) },
            UndoAction::FoundationUndoPut { suit: Suit::Spades },
            UndoAction::TableauUndoGet { column: 6, cards: vec![card("K♠")] },
            UndoAction::TableauUndoPut { column: 0, count: 4 },
            UndoAction::TableauUndoReveal { column: 2 },
            UndoAction::WasteUndoGet { card: card("10♦") },
            UndoAction::StockUndoDeal,
            UndoAction::StockUndoRecycle,
        ];
        for action in actions {
            assert_eq!(UndoAction::from_record(&action.to_record()).unwrap(), action);
        }
    }

    #[test]
    fn test_rejects_unknown_operation() {
        let record = ActionRecord {
            operation: "tableau.clear".to_string(),
            args: vec![],
        };
        assert!(matches!(
            UndoAction::from_record(&record),
            Err(KlondikeError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let bad = [
            ActionRecord {
                operation: "tableau.undo_put".into(),
                args: vec![ArgValue::Int(9), ArgValue::Int(1)],
            },
            ActionRecord {
                operation: "tableau.undo_put".into(),
                args: vec![ArgValue::Int(1), ArgValue::Int(0)],
            },
            ActionRecord {
                operation: "tableau.undo_reveal".into(),
                args: vec![ArgValue::Int(-1)],
            },
            ActionRecord {
                operation: "tableau.undo_reveal".into(),
                args: vec![ArgValue::Text("1".into())],
            },
            ActionRecord {
                operation: "tableau.undo_get".into(),
                args: vec![ArgValue::Int(1)],
            },
            ActionRecord {
                operation: "foundation.undo_get".into(),
                args: vec![ArgValue::Text("♥".into()), ArgValue::Text("Q♠".into())],
            },
            ActionRecord {
                operation: "stock.undo_deal".into(),
                args: vec![ArgValue::Int(1)],
            },
        ];
        for record in &bad {
            assert!(
                matches!(UndoAction::from_record(record), Err(KlondikeError::InvalidRecord(_))),
                "accepted {:?}",
                record
            );
        }

        let record = ActionRecord {
            operation: "foundation.undo_put".into(),
            args: vec![ArgValue::Text("X".into())],
        };
        assert!(matches!(
            UndoAction::from_record(&record),
            Err(KlondikeError::UnknownSuit(_))
        ));
    }

    #[test]
    fn test_record_json_form() {
        let record = UndoAction::TableauUndoPut { column: 1, count: 2 }.to_record();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"operation":"tableau.undo_put","args":[1,2]}"#);

        let parsed: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}

//! Foundation: four ascending same-suit piles.
//!
//! A pile for suit S is always exactly `A..k` of S for some k in 0..=13.
//! Only a face-up card one rank above the current top (or an Ace on an
//! empty pile) is accepted.

use im::Vector;

use crate::cards::{Card, Rank, Suit};
use crate::core::{KlondikeError, Result, CARDS_PER_SUIT};
use crate::undo::{Turn, UndoAction};

/// The four foundation piles, indexed by `Suit::index`.
#[derive(Clone, Debug, Default)]
pub struct Foundation {
    piles: [Vector<Card>; 4],
}

impl Foundation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards on the `suit` pile, Ace first.
    #[must_use]
    pub fn pile(&self, suit: Suit) -> &Vector<Card> {
        &self.piles[suit.index()]
    }

    #[must_use]
    pub fn top(&self, suit: Suit) -> Option<&Card> {
        self.pile(suit).back()
    }

    /// Rank the `suit` pile needs next, `None` once it reaches King.
    #[must_use]
    pub fn next_rank(&self, suit: Suit) -> Option<Rank> {
        match self.top(suit) {
            Some(top) => top.rank.next(),
            None => Some(Rank::Ace),
        }
    }

    /// True if `put(card)` would succeed. Side-effect free.
    #[must_use]
    pub fn can_accept(&self, card: &Card) -> bool {
        card.face_up && self.next_rank(card.suit) == Some(card.rank)
    }

    /// Place a card on its suit's pile.
    pub fn put(&mut self, card: Card, turn: &mut Turn) -> Result<()> {
        if card.is_concealed() {
            return Err(KlondikeError::ConcealedCard(
                "foundation cards must be revealed".to_string(),
            ));
        }
        if self.next_rank(card.suit) != Some(card.rank) {
            return Err(KlondikeError::BuildOrder(match self.top(card.suit) {
                Some(top) => format!("{} cannot follow {}", card, top),
                None => format!("{} pile must start with an Ace, got {}", card.suit, card),
            }));
        }

        self.piles[card.suit.index()].push_back(card);
        turn.record(UndoAction::FoundationUndoPut { suit: card.suit });
        Ok(())
    }

    /// Remove and return the top card of the `suit` pile.
    pub fn get(&mut self, suit: Suit, turn: &mut Turn) -> Result<Card> {
        let card = self.piles[suit.index()]
            .pop_back()
            .ok_or_else(|| KlondikeError::EmptyPile(format!("no foundation cards for {}", suit)))?;
        turn.record(UndoAction::FoundationUndoGet { card });
        Ok(card)
    }

    /// True once every suit runs Ace..King.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.piles.iter().all(|pile| pile.len() == CARDS_PER_SUIT)
    }

    /// Cards across all four piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.piles.iter().flat_map(|pile| pile.iter())
    }

    /// Inverse of `get`. Refuses cards that would break build order.
    pub(crate) fn restore(&mut self, card: Card) -> Result<()> {
        let card = card.revealed();
        if !self.can_accept(&card) {
            return Err(KlondikeError::record(format!(
                "{} does not fit the {} foundation pile",
                card, card.suit
            )));
        }
        self.piles[card.suit.index()].push_back(card);
        Ok(())
    }

    /// Inverse of `put`.
    pub(crate) fn remove_top(&mut self, suit: Suit) -> Result<Card> {
        self.piles[suit.index()]
            .pop_back()
            .ok_or_else(|| KlondikeError::record(format!("{} foundation pile is empty", suit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    #[test]
    fn test_ace_starts_pile() {
        let mut foundation = Foundation::new();
        let mut turn = Turn::new();

        foundation.put(card("A♥"), &mut turn).unwrap();
        foundation.put(card("2♥"), &mut turn).unwrap();

        assert_eq!(foundation.top(Suit::Hearts), Some(&card("2♥")));
        assert_eq!(foundation.len(), 2);
        assert_eq!(
            turn.actions(),
            &[
                UndoAction::FoundationUndoPut { suit: Suit::Hearts },
                UndoAction::FoundationUndoPut { suit: Suit::Hearts },
            ]
        );
    }

    #[test]
    fn test_build_order_enforced() {
        let mut foundation = Foundation::new();
        let mut turn = Turn::new();

        assert!(matches!(
            foundation.put(card("2♠"), &mut turn),
            Err(KlondikeError::BuildOrder(_))
        ));
        foundation.put(card("A♠"), &mut turn).unwrap();
        assert!(matches!(
            foundation.put(card("3♠"), &mut turn),
            Err(KlondikeError::BuildOrder(_))
        ));
        assert!(matches!(
            foundation.put(card("A♠"), &mut turn),
            Err(KlondikeError::BuildOrder(_))
        ));
        // Failed puts record nothing.
        assert_eq!(turn.len(), 1);
    }

    #[test]
    fn test_concealed_rejected() {
        let mut foundation = Foundation::new();
        let mut turn = Turn::new();

        let result = foundation.put(card("A♦").concealed(), &mut turn);
        assert!(matches!(result, Err(KlondikeError::ConcealedCard(_))));
        assert!(foundation.is_empty());
        assert!(turn.is_empty());
        assert!(!foundation.can_accept(&card("A♦").concealed()));
    }

    #[test]
    fn test_get_and_empty() {
        let mut foundation = Foundation::new();
        let mut turn = Turn::new();

        assert!(matches!(
            foundation.get(Suit::Clubs, &mut turn),
            Err(KlondikeError::EmptyPile(_))
        ));

        foundation.put(card("A♣"), &mut turn).unwrap();
        let got = foundation.get(Suit::Clubs, &mut turn).unwrap();
        assert_eq!(got, card("A♣"));
        assert_eq!(
            turn.actions().last(),
            Some(&UndoAction::FoundationUndoGet { card: card("A♣") })
        );
    }

    #[test]
    fn test_complete() {
        let mut foundation = Foundation::new();
        let mut turn = Turn::new();
        assert!(!foundation.is_complete());

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                foundation.put(Card::new(rank, suit), &mut turn).unwrap();
            }
        }

        assert!(foundation.is_complete());
        assert_eq!(foundation.next_rank(Suit::Spades), None);
        assert!(!foundation.can_accept(&card("K♠")));
    }

    #[test]
    fn test_restore_checks_order() {
        let mut foundation = Foundation::new();
        assert!(foundation.restore(card("3♣")).is_err());
        foundation.restore(card("A♣").concealed()).unwrap();
        assert!(foundation.top(Suit::Clubs).unwrap().face_up);
        assert_eq!(foundation.remove_top(Suit::Clubs).unwrap(), card("A♣"));
        assert!(foundation.remove_top(Suit::Clubs).is_err());
    }
}

//! Full-deck factory.

use crate::core::{GameRng, DECK_SIZE};

use super::card::{Card, Rank, Suit};

/// A 52-card deck of face-down cards.
///
/// The last card in the deck is the next one dealt.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    shuffled: bool,
}

impl Deck {
    /// An ordered deck: suits in `Suit::ALL` order, Ace..King within a suit.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit).concealed()))
            .collect();
        Self {
            cards,
            shuffled: false,
        }
    }

    /// A deck shuffled with the given stream.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// A deck in an explicit order (last card dealt first).
    ///
    /// Cards are turned face-down. Used by hosts that bring their own
    /// shuffle and by tests that need a known layout.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().map(Card::concealed).collect(),
            shuffled: false,
        }
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        self.shuffled = true;
    }

    #[must_use]
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Take the next card.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True if the deck holds each of the 52 cards exactly once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let unique: rustc_hash::FxHashSet<Card> = self.cards.iter().copied().collect();
        self.cards.len() == DECK_SIZE && unique.len() == DECK_SIZE
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

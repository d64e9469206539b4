//! Card values: rank, suit, color family, visibility.
//!
//! A `Card` is a small `Copy` value. Flipping produces a new value with a
//! different visibility; identity (and equality) is `(rank, suit)` only.
//!
//! Text tokens are `<rank><suit glyph>`, e.g. `A♠`, `10♥`, `Q♦`. Parsing
//! also accepts the ASCII suit letters `C`, `D`, `H`, `S`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{KlondikeError, Result};

/// Card rank, Ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, Ace = 1 through King = 13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value in `1..=13`.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// The next higher rank, `None` for King.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_value(self.value() + 1)
    }

    /// Token used in card text.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Rank {
    type Err = KlondikeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rank| rank.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| KlondikeError::InvalidToken(format!("no such rank {:?}", s)))
    }
}

/// Color family used by the alternating-color tableau rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits, in foundation order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Position in `Suit::ALL`, used to index per-suit arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color family.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    /// Canonical glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '♣' | 'C' | 'c' => Some(Suit::Clubs),
            '♦' | 'D' | 'd' => Some(Suit::Diamonds),
            '♥' | 'H' | 'h' => Some(Suit::Hearts),
            '♠' | 'S' | 's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Suit {
    type Err = KlondikeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| KlondikeError::UnknownSuit(format!("{:?}", s)))
    }
}

/// A playing card with its visibility.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    /// True when the card is showing its face.
    pub face_up: bool,
}

impl Card {
    /// A face-up card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: true,
        }
    }

    /// The same card turned face-up.
    #[must_use]
    pub const fn revealed(self) -> Self {
        Self {
            face_up: true,
            ..self
        }
    }

    /// The same card turned face-down.
    #[must_use]
    pub const fn concealed(self) -> Self {
        Self {
            face_up: false,
            ..self
        }
    }

    #[must_use]
    pub const fn is_concealed(&self) -> bool {
        !self.face_up
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// True if `self` may sit directly on `other` in a tableau column:
    /// one rank lower and the opposite color family.
    #[must_use]
    pub fn stacks_on(&self, other: &Card) -> bool {
        other.rank.value() == self.rank.value() + 1 && other.color() != self.color()
    }

    /// Token for display to a player, hiding concealed cards.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.face_up {
            self.to_string()
        } else {
            "▒▒".to_string()
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.rank.hash(hasher);
        self.suit.hash(hasher);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Parses a token into a face-up card.
impl FromStr for Card {
    type Err = KlondikeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (split, suit_char) = s
            .char_indices()
            .last()
            .ok_or_else(|| KlondikeError::InvalidToken("empty card token".to_string()))?;
        if split == 0 {
            return Err(KlondikeError::InvalidToken(format!("card token {:?} has no rank", s)));
        }
        let suit = Suit::from_char(suit_char)
            .ok_or_else(|| KlondikeError::UnknownSuit(format!("{:?} in card {:?}", suit_char, s)))?;
        let rank = s[..split].parse::<Rank>()?;
        Ok(Card::new(rank, suit))
    }
}

//! Error taxonomy for move validation and undo-log handling.
//!
//! Every rejected operation reports exactly one `KlondikeError`. The kind
//! tells the caller *why* a move was refused; the message carries the
//! human-readable detail (which pile, which card).

/// Errors raised by piles, the undo log, and the game orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KlondikeError {
    /// Removal from an empty pile.
    EmptyPile(String),
    /// Foundation placement out of ascending same-suit order.
    BuildOrder(String),
    /// A face-down card was used where a face-up card is required.
    ConcealedCard(String),
    /// A suit token outside the four known suits.
    UnknownSuit(String),
    /// Tableau or orchestrator level illegality.
    IllegalMove(String),
    /// A card or rank token that cannot be parsed.
    InvalidToken(String),
    /// An undo record that is not on the allow-list, has malformed
    /// arguments, or does not fit the piles it is replayed against.
    InvalidRecord(String),
}

impl KlondikeError {
    pub(crate) fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalMove(message.into())
    }

    pub(crate) fn record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    /// True for the catch-all move rejection kind.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, Self::IllegalMove(_))
    }
}

impl std::fmt::Display for KlondikeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPile(s) => write!(f, "empty pile: {}", s),
            Self::BuildOrder(s) => write!(f, "build order: {}", s),
            Self::ConcealedCard(s) => write!(f, "concealed card: {}", s),
            Self::UnknownSuit(s) => write!(f, "unknown suit: {}", s),
            Self::IllegalMove(s) => write!(f, "illegal move: {}", s),
            Self::InvalidToken(s) => write!(f, "invalid token: {}", s),
            Self::InvalidRecord(s) => write!(f, "invalid undo record: {}", s),
        }
    }
}

impl std::error::Error for KlondikeError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KlondikeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_kind() {
        let err = KlondikeError::illegal("pile 0 equals destination");
        assert_eq!(err.to_string(), "illegal move: pile 0 equals destination");
        assert!(err.is_illegal_move());

        let err = KlondikeError::EmptyPile("waste".to_string());
        assert_eq!(err.to_string(), "empty pile: waste");
        assert!(!err.is_illegal_move());
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(KlondikeError::record("nope"));
        assert_eq!(err.to_string(), "invalid undo record: nope");
    }
}

//! Card values - suit, rank and (for War) visibility.
//!
//! A `Card` is an immutable value. Equality and hashing use suit and rank
//! only; the `face_up` flag is presentation state and never affects
//! comparison.
//!
//! ## Rank Encoding
//!
//! Ranks are stored as `1..=13`. The deck labels rank 1 as the Ace, which is
//! what Snap sees. War compares ranks numerically, so in War rank 13 is the
//! highest card dealt. Each game interprets rank on its own terms.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Lowest rank value (the Ace label in the shared deck).
pub const MIN_RANK: u8 = 1;

/// Highest rank value (the top card in War).
pub const MAX_RANK: u8 = 13;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        };
        f.write_str(name)
    }
}

/// A playing card.
///
/// ```
/// use duel_cards::cards::{Card, Suit};
///
/// let a = Card::new(Suit::Hearts, 5);
/// let b = Card::new(Suit::Clubs, 5);
///
/// assert!(a.same_rank(&b));
/// assert_ne!(a, b);
/// assert_eq!(a, a.with_face_up(true)); // visibility is not identity
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: u8,
    #[serde(default)]
    face_up: bool,
}

impl Card {
    /// Create a face-down card.
    ///
    /// Panics if `rank` is outside `1..=13`.
    #[must_use]
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "Rank must be in 1..=13, got {rank}"
        );
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Copy of this card with the given visibility.
    #[must_use]
    pub const fn with_face_up(self, face_up: bool) -> Self {
        Self { face_up, ..self }
    }

    /// Compare ranks, ignoring suit.
    #[must_use]
    pub const fn same_rank(&self, other: &Card) -> bool {
        self.rank == other.rank
    }

    /// Whether the deck labels this card as an Ace (rank 1).
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == MIN_RANK
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_accessors() {
        let card = Card::new(Suit::Spades, 12);

        assert_eq!(card.suit(), Suit::Spades);
        assert_eq!(card.rank(), 12);
        assert!(!card.is_face_up());
        assert!(!card.is_ace());
        assert!(Card::new(Suit::Spades, 1).is_ace());
    }

    #[test]
    fn test_equality_ignores_face_up() {
        use std::collections::hash_map::DefaultHasher;

        let down = Card::new(Suit::Hearts, 7);
        let up = down.with_face_up(true);

        assert!(up.is_face_up());
        assert_eq!(down, up);

        let hash = |c: &Card| {
            let mut h = DefaultHasher::new();
            c.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&down), hash(&up));
    }

    #[test]
    fn test_same_rank_ignores_suit() {
        let a = Card::new(Suit::Hearts, 9);
        let b = Card::new(Suit::Diamonds, 9);
        let c = Card::new(Suit::Hearts, 10);

        assert!(a.same_rank(&b));
        assert!(!a.same_rank(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Card::new(Suit::Clubs, 13)), "13 of clubs");
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(Suit::Diamonds, 4).with_face_up(true);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"diamonds\""));

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
        assert!(deserialized.is_face_up());
    }

    #[test]
    #[should_panic(expected = "Rank must be in 1..=13")]
    fn test_rank_out_of_range() {
        let _ = Card::new(Suit::Hearts, 14);
    }
}

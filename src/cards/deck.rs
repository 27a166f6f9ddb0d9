//! The standard 52-card deck.
//!
//! A `Deck` knows nothing about game rules: it is built in canonical order,
//! shuffled once, and drawn from the front while dealing.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit, MAX_RANK, MIN_RANK};
use crate::core::rng::GameRng;
use crate::error::DeckError;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// An ordered deck of cards. The front is the next card drawn.
///
/// ## Example
///
/// ```
/// use duel_cards::cards::Deck;
/// use duel_cards::core::GameRng;
///
/// let mut deck = Deck::new();
/// deck.shuffle(&mut GameRng::new(7));
///
/// let hand = deck.draw(5).unwrap();
/// assert_eq!(hand.len(), 5);
/// assert_eq!(deck.size(), 47);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create a full deck in canonical order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Self::canonical(),
        }
    }

    /// Canonical order: hearts, diamonds, clubs, spades; ranks ascending.
    fn canonical() -> Vector<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| (MIN_RANK..=MAX_RANK).map(move |rank| Card::new(suit, rank)))
            .collect()
    }

    /// Shuffle in place (Fisher-Yates).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range_usize(0..i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Remove and return `count` cards from the front.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        let rest = self.cards.split_off(count);
        let drawn = std::mem::replace(&mut self.cards, rest);
        Ok(drawn.into_iter().collect())
    }

    /// Remove and return the front card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::Empty)
    }

    /// Restore the full deck in canonical order.
    pub fn reset(&mut self) {
        self.cards = Self::canonical();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Copy of the remaining cards, front first.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

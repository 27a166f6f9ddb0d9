//! Card primitives: card values and the 52-card deck.
//!
//! ## Key Types
//!
//! - `Card`: Immutable suit + rank value, with a War-only face-up flag
//! - `Suit`: The four French suits
//! - `Deck`: Ordered 52-card deck with Fisher-Yates shuffle and front draws
//!
//! Nothing here knows about game rules or players.

pub mod card;
pub mod deck;

pub use card::{Card, Suit, MAX_RANK, MIN_RANK};
pub use deck::{Deck, DECK_SIZE};

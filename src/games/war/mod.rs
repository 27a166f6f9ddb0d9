//! War: simultaneous flips, higher rank takes the pile.
//!
//! - Both players flip their front card onto the battle pile
//! - Once both have flipped, the higher rank takes every card on the pile
//! - A tie starts a war: each player commits face-down cards plus a new
//!   face-up card, and the new face-up cards are compared (recursively)
//! - A player who cannot cover a war loses it and surrenders their hand
//!
//! Ranks compare numerically, so 13 is the highest card.

mod game;
mod state;

pub use game::WarGame;
pub use state::WarState;

//! Snap: alternate plays onto a shared pile, race to claim matching ranks.
//!
//! - Players take turns playing their front card onto the central pile
//! - When the top two cards share a rank, either player may snap (no turn
//!   restriction) and takes the whole pile
//! - Snapping when there is no match costs one card, which goes onto the pile

mod game;
mod state;

pub use game::SnapGame;
pub use state::SnapState;

//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - How the deck is dealt
//! - Which actions are legal
//! - How actions modify state
//! - Win/draw conditions
//!
//! Rooms call into `RulesEngine` but never interpret game-specific
//! concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine};

//! Game implementations.
//!
//! Each game provides a state shape and a `RulesEngine`:
//!
//! - `war`: Simultaneous flips with recursive war on ties
//! - `snap`: Turn-based plays with a race to claim matching pairs

pub mod snap;
pub mod war;

pub use snap::{SnapGame, SnapState};
pub use war::{WarGame, WarState};

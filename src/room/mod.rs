//! Game rooms.
//!
//! A `Room` owns one `Table` (a War or Snap state) plus the engines that
//! drive it. It seats players, deals when the room fills, and runs every
//! action through validate, process and game-over finalization.
//!
//! ## Key Types
//!
//! - `Room`: Seat management and the action pipeline
//! - `Table`: Tagged game state, dispatching to the matching `RulesEngine`
//! - `Engines`: One engine per game, sharing a `GameConfig`

mod game_room;
mod table;

pub use game_room::{JoinOutcome, Room, RoomUpdate};
pub use table::{Engines, Table};

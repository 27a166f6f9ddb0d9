//! Lobby matchmaking.
//!
//! Players wait in a `LobbyState` keyed by session. The `Matchmaker` pairs
//! the two earliest eligible players of the same game type and detects
//! players that have waited too long. `Lobby::tick` is the scheduler pass the
//! orchestration layer runs every `MatchmakerConfig::sweep_interval`.

mod config;
mod matchmaker;
mod state;
mod waiting_room;

pub use config::MatchmakerConfig;
pub use matchmaker::{MatchId, MatchResult, Matchmaker};
pub use state::{LobbyState, LobbyStatus, WaitingPlayer};
pub use waiting_room::{Lobby, LobbyMessage, LobbyNotice, TickReport};

//! # duel-cards
//!
//! Server core for two-player card games: authoritative War and Snap
//! engines, game rooms, and a lobby that pairs waiting players.
//!
//! ## Design Principles
//!
//! 1. **Stateless Engines**: Engines hold only configuration. The one live
//!    state of a game is passed in on every call and mutated in place.
//!
//! 2. **Typed Rejections**: Illegal actions come back as `ActionError`
//!    values and never touch state.
//!
//! 3. **Cheap Snapshots**: Hands and piles are `im` persistent vectors, so a
//!    room can hand out full copies of its state at any time.
//!
//! ## Modules
//!
//! - `cards`: Card values and the 52-card deck
//! - `core`: Sessions, players, actions, game state, RNG, configuration
//! - `rules`: `RulesEngine` trait shared by every game
//! - `games`: War and Snap
//! - `room`: One game instance, its seats and its action pipeline
//! - `lobby`: Waiting players, FIFO matchmaking and timeouts
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod error;
pub mod games;
pub mod lobby;
pub mod room;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{Card, Deck, Suit, DECK_SIZE};

pub use crate::core::{
    Action, ActionKind, ActionOutcome, ActionRecord, BattleOutcome,
    GameConfig, GameRng, GameRngState, GameState, GameStatus, GameType,
    Player, PlayerStatus, SessionId,
};

pub use crate::error::{ActionError, DeckError, LobbyError, RoomError, RoomResult, SetupError};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::{SnapGame, SnapState, WarGame, WarState};

pub use crate::room::{Engines, JoinOutcome, Room, RoomUpdate, Table};

pub use crate::lobby::{
    Lobby, LobbyMessage, LobbyNotice, LobbyState, LobbyStatus, MatchId, MatchResult,
    Matchmaker, MatchmakerConfig, TickReport, WaitingPlayer,
};

//! Error types for decks, engines, rooms and the lobby.
//!
//! Validation failures are user-correctable and returned as values; nothing
//! in this crate retries. Invariant violations inside the engines are not
//! represented here - they are logged and panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::action::ActionKind;
use crate::core::config::GameType;
use crate::core::player::SessionId;

/// Deck draw failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("insufficient cards: requested {requested}, {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("cannot draw from an empty deck")]
    Empty,
}

/// Reasons an action is rejected before it is applied.
///
/// A rejected action never mutates state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    #[error("not your turn")]
    NotYourTurn,

    #[error("no cards in hand")]
    NoCardsInHand,

    #[error("already flipped this round")]
    AlreadyFlipped,

    #[error("unknown action type {kind} for {game}")]
    UnknownAction { kind: ActionKind, game: GameType },

    #[error("{0} is not seated in this game")]
    UnknownPlayer(SessionId),

    #[error("game is not in progress")]
    GameNotInProgress,
}

/// Failures while dealing a new game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("need {required} players to start, have {present}")]
    NotEnoughPlayers { required: usize, present: usize },

    #[error("at most {max} players supported, got {present}")]
    TooManyPlayers { max: usize, present: usize },

    #[error("game has already been initialized")]
    AlreadyStarted,
}

/// Room-level failures surfaced to the orchestration layer.
#[derive(Error, Debug)]
pub enum RoomError {
    #[error("room is full ({capacity} players)")]
    RoomFull { capacity: usize },

    #[error("{0} has already joined this room")]
    AlreadyJoined(SessionId),

    #[error("game has already started")]
    GameStarted,

    #[error("{0} is not in this room")]
    UnknownPlayer(SessionId),

    #[error("action rejected: {0}")]
    Rejected(#[from] ActionError),

    #[error("game setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Lobby registration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("{0} is already waiting in the lobby")]
    AlreadyWaiting(SessionId),

    #[error("{0} is not in the lobby")]
    UnknownPlayer(SessionId),
}

pub type RoomResult<T> = Result<T, RoomError>;

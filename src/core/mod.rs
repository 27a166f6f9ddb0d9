//! Core types: players, actions, state, RNG, configuration.
//!
//! This module contains the building blocks that are game-agnostic.
//! War and Snap build their state shapes on top of `GameState`.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionOutcome, ActionRecord, BattleOutcome};
pub use config::{GameConfig, GameType, UnknownGameType};
pub use player::{Player, PlayerStatus, SessionId};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStatus};

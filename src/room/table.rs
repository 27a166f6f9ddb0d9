//! Engine + state pairing, selected by `GameType`.
//!
//! `Table` is the tagged variant that lets a room hold either game without
//! knowing which. Every method dispatches to the matching `RulesEngine`.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionOutcome, GameConfig, GameRng, GameState, GameType, Player, SessionId,
};
use crate::error::{ActionError, SetupError};
use crate::games::{SnapGame, SnapState, WarGame, WarState};
use crate::rules::{GameResult, RulesEngine};

/// One game's engine and its one live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Table {
    War(WarState),
    Snap(SnapState),
}

/// Engines for both games, sharing one config.
#[derive(Clone, Debug, Default)]
pub struct Engines {
    war: WarGame,
    snap: SnapGame,
}

impl Engines {
    pub fn new(config: GameConfig) -> Self {
        Self {
            war: WarGame::new(config.clone()),
            snap: SnapGame::new(config),
        }
    }
}

impl Table {
    /// An empty table for the given game.
    #[must_use]
    pub fn new(game_type: GameType) -> Self {
        match game_type {
            GameType::War => Table::War(WarState::new()),
            GameType::Snap => Table::Snap(SnapState::new()),
        }
    }

    #[must_use]
    pub fn game_type(&self) -> GameType {
        match self {
            Table::War(_) => GameType::War,
            Table::Snap(_) => GameType::Snap,
        }
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        match self {
            Table::War(s) => s.game(),
            Table::Snap(s) => s.game(),
        }
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        match self {
            Table::War(s) => s.game_mut(),
            Table::Snap(s) => s.game_mut(),
        }
    }

    /// Cards in hands plus whichever pile this game uses.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        match self {
            Table::War(s) => s.total_cards(),
            Table::Snap(s) => s.total_cards(),
        }
    }

    pub fn initialize(
        &mut self,
        engines: &Engines,
        players: &[Player],
        rng: &mut GameRng,
    ) -> Result<(), SetupError> {
        match self {
            Table::War(s) => engines.war.initialize(s, players, rng),
            Table::Snap(s) => engines.snap.initialize(s, players, rng),
        }
    }

    pub fn validate_action(&self, engines: &Engines, action: &Action) -> Result<(), ActionError> {
        match self {
            Table::War(s) => engines.war.validate_action(s, action),
            Table::Snap(s) => engines.snap.validate_action(s, action),
        }
    }

    pub fn process_action(&mut self, engines: &Engines, action: &Action) -> ActionOutcome {
        match self {
            Table::War(s) => engines.war.process_action(s, action),
            Table::Snap(s) => engines.snap.process_action(s, action),
        }
    }

    #[must_use]
    pub fn is_game_over(&self, engines: &Engines) -> bool {
        match self {
            Table::War(s) => engines.war.is_game_over(s),
            Table::Snap(s) => engines.snap.is_game_over(s),
        }
    }

    #[must_use]
    pub fn winner(&self, engines: &Engines) -> Option<SessionId> {
        match self {
            Table::War(s) => engines.war.winner(s),
            Table::Snap(s) => engines.snap.winner(s),
        }
    }

    #[must_use]
    pub fn is_terminal(&self, engines: &Engines) -> Option<GameResult> {
        match self {
            Table::War(s) => engines.war.is_terminal(s),
            Table::Snap(s) => engines.snap.is_terminal(s),
        }
    }
}

//! A game room: seats players, starts the game and runs actions through
//! validate -> process -> finalize.
//!
//! Actions for one room must be serialized by the caller. The room holds no
//! locks and shares nothing with other rooms.

use tracing::{info, warn};

use super::table::{Engines, Table};
use crate::core::{
    Action, ActionOutcome, GameConfig, GameRng, GameState, GameStatus, GameType, Player, SessionId,
};
use crate::error::{RoomError, RoomResult};
use crate::rules::GameResult;

/// Result of a successful join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Seated; waiting for more players.
    Seated { seat: usize },
    /// Seated, and the game was dealt.
    Started { seat: usize },
}

/// Result of an applied action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomUpdate {
    pub outcome: ActionOutcome,
    /// Set when this action ended the game.
    pub result: Option<GameResult>,
}

/// One game instance bound to its engine.
#[derive(Clone, Debug)]
pub struct Room {
    config: GameConfig,
    engines: Engines,
    table: Table,
    rng: GameRng,
}

impl Room {
    /// Create a room with a random shuffle seed.
    pub fn new(game_type: GameType, config: GameConfig) -> Self {
        Self::with_rng(game_type, config, GameRng::from_entropy())
    }

    /// Create a room with a fixed shuffle seed.
    pub fn with_seed(game_type: GameType, config: GameConfig, seed: u64) -> Self {
        Self::with_rng(game_type, config, GameRng::new(seed))
    }

    fn with_rng(game_type: GameType, config: GameConfig, rng: GameRng) -> Self {
        Self::restore(Table::new(game_type), config, rng)
    }

    /// Resume from an existing table, e.g. a decoded snapshot.
    pub fn restore(table: Table, config: GameConfig, rng: GameRng) -> Self {
        Self {
            engines: Engines::new(config.clone()),
            config,
            table,
            rng,
        }
    }

    pub fn game_type(&self) -> GameType {
        self.table.game_type()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn state(&self) -> &GameState {
        self.table.game()
    }

    /// Seat a player. The game is dealt as soon as enough players are seated.
    pub fn join(&mut self, player: Player) -> RoomResult<JoinOutcome> {
        let game = self.table.game();
        if game.status() != GameStatus::Waiting {
            warn!(session = %player.session_id, "join after game start");
            return Err(RoomError::GameStarted);
        }
        if game.has_player(&player.session_id) {
            return Err(RoomError::AlreadyJoined(player.session_id));
        }
        if game.player_count() >= self.config.max_players {
            return Err(RoomError::RoomFull {
                capacity: self.config.max_players,
            });
        }

        let session = player.session_id.clone();
        self.table.game_mut().add_player(player);
        let seat = self.table.game().player_count() - 1;
        info!(session = %session, seat, game = %self.game_type(), "player joined");

        if self.table.game().player_count() < self.config.min_players {
            return Ok(JoinOutcome::Seated { seat });
        }

        let players = self.table.game().players().to_vec();
        self.table.initialize(&self.engines, &players, &mut self.rng)?;
        info!(game = %self.game_type(), "game started");
        Ok(JoinOutcome::Started { seat })
    }

    /// Remove a player.
    ///
    /// Before the deal this frees the seat. During play the remaining player
    /// wins by forfeit and the game completes.
    pub fn leave(&mut self, session: &SessionId) -> RoomResult<Option<GameResult>> {
        if !self.table.game().has_player(session) {
            return Err(RoomError::UnknownPlayer(session.clone()));
        }

        match self.table.game().status() {
            GameStatus::Waiting => {
                self.table.game_mut().remove_player(session);
                info!(session = %session, "player left before start");
                Ok(None)
            }
            GameStatus::Playing => {
                let winner = self
                    .table
                    .game()
                    .session_ids()
                    .find(|s| *s != session)
                    .cloned();
                self.table.game_mut().complete(winner.clone());
                info!(session = %session, winner = ?winner, "player left, game forfeited");
                Ok(Some(match winner {
                    Some(w) => GameResult::Winner(w),
                    None => GameResult::Draw,
                }))
            }
            GameStatus::Completed => Ok(None),
        }
    }

    /// Validate and apply one action, finalizing the game if it ended.
    pub fn handle_action(&mut self, action: &Action) -> RoomResult<RoomUpdate> {
        if let Err(e) = self.table.validate_action(&self.engines, action) {
            warn!(session = %action.player, kind = %action.kind, error = %e, "action rejected");
            return Err(e.into());
        }

        let outcome = self.table.process_action(&self.engines, action);
        let result = if self.table.is_game_over(&self.engines) {
            Some(self.finish())
        } else {
            None
        };

        Ok(RoomUpdate { outcome, result })
    }

    fn finish(&mut self) -> GameResult {
        let result = self
            .table
            .is_terminal(&self.engines)
            .unwrap_or(GameResult::Draw);
        self.table.game_mut().complete(result.winner().cloned());
        info!(
            game = %self.game_type(),
            winner = ?result.winner(),
            actions = self.table.game().history().len(),
            "game over"
        );
        result
    }

    /// Detached copy of the current state. Cheap: hands and piles are
    /// persistent vectors.
    pub fn snapshot(&self) -> Table {
        self.table.clone()
    }

    /// Binary encoding of the current state for transport.
    pub fn encode_snapshot(&self) -> RoomResult<Vec<u8>> {
        Ok(bincode::serialize(&self.table)?)
    }

    /// Decode a snapshot produced by `encode_snapshot`.
    pub fn decode_snapshot(bytes: &[u8]) -> RoomResult<Table> {
        Ok(bincode::deserialize(bytes)?)
    }
}

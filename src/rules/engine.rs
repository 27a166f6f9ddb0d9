//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - How a game is dealt
//! - What actions are legal
//! - How actions modify state
//! - Win/draw conditions

use tracing::info;

use crate::cards::Deck;
use crate::core::action::{Action, ActionOutcome};
use crate::core::config::GameType;
use crate::core::player::{Player, SessionId};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, GameStatus};
use crate::error::{ActionError, SetupError};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(SessionId),
    /// Nobody holds cards.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &SessionId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<&SessionId> {
        match self {
            GameResult::Winner(p) => Some(p),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// Engines are stateless: the game's one live state is passed in on every
/// call and mutated in place, so its identity is preserved for whatever sync
/// layer is watching it.
///
/// ## Implementation Notes
///
/// - `validate_action`: Pure. Must not mutate.
/// - `process_action`: Re-checks validity and returns `Rejected` without
///   mutating if the action is illegal. Any cascading resolution finishes
///   before it returns.
/// - `is_game_over`: Default is "at most one player still holds cards".
pub trait RulesEngine {
    /// Game-specific state shape.
    type State: AsRef<GameState> + AsMut<GameState>;

    /// Which game this engine plays.
    fn game_type(&self) -> GameType;

    /// Seat any missing players, deal a fresh shuffled deck and start play.
    fn initialize(
        &self,
        state: &mut Self::State,
        players: &[Player],
        rng: &mut GameRng,
    ) -> Result<(), SetupError>;

    /// Check whether an action is legal right now.
    fn validate_action(&self, state: &Self::State, action: &Action) -> Result<(), ActionError>;

    /// Apply one action.
    fn process_action(&self, state: &mut Self::State, action: &Action) -> ActionOutcome;

    /// Check if the game is over.
    fn is_game_over(&self, state: &Self::State) -> bool {
        let game = state.as_ref();
        match game.status() {
            GameStatus::Waiting => false,
            GameStatus::Completed => true,
            GameStatus::Playing => game.players_with_cards().len() <= 1,
        }
    }

    /// The winner, if the game is over and someone still holds cards.
    fn winner(&self, state: &Self::State) -> Option<SessionId> {
        let game = state.as_ref();
        if game.status() == GameStatus::Completed {
            return game.winner().cloned();
        }
        if !self.is_game_over(state) {
            return None;
        }
        match game.players_with_cards().as_slice() {
            [only] => Some((*only).clone()),
            _ => None,
        }
    }

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult> {
        if !self.is_game_over(state) {
            return None;
        }
        Some(match self.winner(state) {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::Draw,
        })
    }
}

/// Seat missing players, then shuffle a fresh deck and deal it round-robin.
///
/// Shared by every engine. Dealing order is seat 0, seat 1, seat 0, ...
/// until the deck is exhausted.
pub(crate) fn seat_and_deal(
    game: &mut GameState,
    players: &[Player],
    min_players: usize,
    max_players: usize,
    rng: &mut GameRng,
) -> Result<(), SetupError> {
    if game.status() != GameStatus::Waiting {
        return Err(SetupError::AlreadyStarted);
    }

    let mut seated = game.player_count();
    for player in players {
        if !game.has_player(&player.session_id) {
            seated += 1;
        }
    }
    if seated > max_players {
        return Err(SetupError::TooManyPlayers {
            max: max_players,
            present: seated,
        });
    }
    if seated < min_players {
        return Err(SetupError::NotEnoughPlayers {
            required: min_players,
            present: seated,
        });
    }

    for player in players {
        game.add_player(player.clone());
    }

    let mut deck = Deck::new();
    deck.shuffle(rng);

    let seats: Vec<SessionId> = game.session_ids().cloned().collect();
    let mut seat = 0;
    while let Ok(card) = deck.draw_one() {
        game.push_to_hand(&seats[seat], card);
        seat = (seat + 1) % seats.len();
    }

    game.start();
    info!(players = seats.len(), seed = rng.seed(), "dealt new game");
    Ok(())
}

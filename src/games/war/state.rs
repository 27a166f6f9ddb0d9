//! War state: battle pile, ready set and war depth on top of `GameState`.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::player::SessionId;
use crate::core::state::GameState;

/// Authoritative state of one War game.
///
/// ## Battle Pile Layout
///
/// Cards are interleaved by seat: even positions belong to seat 0, odd
/// positions to seat 1. The last card at each parity is that player's
/// current face-up card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WarState {
    game: GameState,
    battle_pile: Vector<Card>,
    players_ready: SmallVec<[SessionId; 2]>,
    in_war: bool,
    war_depth: u32,
    round_number: u32,
}

impl WarState {
    /// Create an empty, unstarted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-dealt game; play starts at round 1.
    #[must_use]
    pub fn from_game(game: GameState) -> Self {
        let mut state = Self {
            game,
            ..Self::default()
        };
        state.begin_rounds();
        state
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    // === Battle Pile ===

    #[must_use]
    pub fn battle_pile(&self) -> &Vector<Card> {
        &self.battle_pile
    }

    /// Place a flipped card so the pile keeps its seat parity.
    ///
    /// Seat 1 may flip before seat 0 within a round; seat 0's card is then
    /// slotted in front of it.
    pub fn place_flip(&mut self, seat: usize, card: Card) {
        let len = self.battle_pile.len();
        if seat == 0 && len % 2 == 1 {
            self.battle_pile.insert(len - 1, card);
        } else {
            self.battle_pile.push_back(card);
        }
    }

    /// Append a card to the back of the pile.
    pub fn push_to_pile(&mut self, card: Card) {
        self.battle_pile.push_back(card);
    }

    /// Remove the front card of the pile.
    pub fn take_from_pile(&mut self) -> Option<Card> {
        self.battle_pile.pop_front()
    }

    /// The most recent card contributed by `seat`.
    #[must_use]
    pub fn last_card_for_seat(&self, seat: usize) -> Option<Card> {
        self.battle_pile
            .iter()
            .enumerate()
            .rev()
            .find(|(i, _)| i % 2 == seat)
            .map(|(_, card)| *card)
    }

    // === Ready Set ===

    #[must_use]
    pub fn is_ready(&self, session: &SessionId) -> bool {
        self.players_ready.contains(session)
    }

    /// Add a player to the ready set. Returns false if already present.
    pub fn mark_ready(&mut self, session: SessionId) -> bool {
        if self.is_ready(&session) {
            return false;
        }
        self.players_ready.push(session);
        true
    }

    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.players_ready.len()
    }

    #[must_use]
    pub fn players_ready(&self) -> &[SessionId] {
        &self.players_ready
    }

    // === Rounds and Wars ===

    #[must_use]
    pub fn in_war(&self) -> bool {
        self.in_war
    }

    #[must_use]
    pub fn war_depth(&self) -> u32 {
        self.war_depth
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// First round after dealing.
    pub fn begin_rounds(&mut self) {
        self.round_number = 1;
        self.in_war = false;
        self.war_depth = 0;
        self.players_ready.clear();
    }

    /// A tie escalated into a (deeper) war.
    pub fn enter_war(&mut self) {
        self.in_war = true;
        self.war_depth += 1;
    }

    /// Close the round once the pile has been handed out.
    pub fn finish_round(&mut self) {
        debug_assert!(self.battle_pile.is_empty(), "round finished with cards on the pile");
        self.players_ready.clear();
        self.in_war = false;
        self.war_depth = 0;
        self.round_number += 1;
    }

    /// Cards in hands plus the battle pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.game.cards_in_hands() + self.battle_pile.len()
    }
}

impl AsRef<GameState> for WarState {
    fn as_ref(&self) -> &GameState {
        &self.game
    }
}

impl AsMut<GameState> for WarState {
    fn as_mut(&mut self) -> &mut GameState {
        &mut self.game
    }
}

//! Snap state: central pile, turn pointer and snap flag on top of `GameState`.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::player::SessionId;
use crate::core::state::GameState;

/// Authoritative state of one Snap game.
///
/// `snap_available` is kept equal to "the top two pile cards share rank"
/// after every pile edit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapState {
    game: GameState,
    central_pile: Vector<Card>,
    current_turn: Option<SessionId>,
    snap_available: bool,
    last_snap_attempt: Option<SessionId>,
    turns_played: u32,
}

impl SnapState {
    /// Create an empty, unstarted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-dealt game; seat 0 plays first.
    #[must_use]
    pub fn from_game(game: GameState) -> Self {
        let mut state = Self {
            game,
            ..Self::default()
        };
        state.begin_turns();
        state
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    // === Central Pile ===

    /// The pile, bottom first. The last element is the top card.
    #[must_use]
    pub fn central_pile(&self) -> &Vector<Card> {
        &self.central_pile
    }

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.central_pile.back()
    }

    /// Push a card on top and refresh `snap_available`.
    pub fn push_to_pile(&mut self, card: Card) {
        self.central_pile.push_back(card);
        self.refresh_snap();
    }

    /// Remove the bottom card of the pile.
    pub fn take_from_pile(&mut self) -> Option<Card> {
        let card = self.central_pile.pop_front();
        self.refresh_snap();
        card
    }

    fn refresh_snap(&mut self) {
        let len = self.central_pile.len();
        self.snap_available = len >= 2
            && self.central_pile[len - 1].same_rank(&self.central_pile[len - 2]);
    }

    #[must_use]
    pub fn snap_available(&self) -> bool {
        self.snap_available
    }

    // === Turns ===

    #[must_use]
    pub fn current_turn(&self) -> Option<&SessionId> {
        self.current_turn.as_ref()
    }

    /// Give the first turn to seat 0.
    pub fn begin_turns(&mut self) {
        self.current_turn = self.game.session_at(0).cloned();
        self.turns_played = 0;
    }

    /// Pass the turn to the next seat (round-robin).
    pub fn advance_turn(&mut self) {
        let count = self.game.player_count();
        let next = self
            .current_turn
            .as_ref()
            .and_then(|s| self.game.seat_of(s))
            .map_or(0, |seat| (seat + 1) % count.max(1));
        self.current_turn = self.game.session_at(next).cloned();
        self.turns_played += 1;
    }

    /// Number of cards played so far.
    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    // === Snap Attempts ===

    #[must_use]
    pub fn last_snap_attempt(&self) -> Option<&SessionId> {
        self.last_snap_attempt.as_ref()
    }

    pub fn set_last_snap_attempt(&mut self, session: SessionId) {
        self.last_snap_attempt = Some(session);
    }

    /// Cards in hands plus the central pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.game.cards_in_hands() + self.central_pile.len()
    }
}

impl AsRef<GameState> for SnapState {
    fn as_ref(&self) -> &GameState {
        &self.game
    }
}

impl AsMut<GameState> for SnapState {
    fn as_mut(&mut self) -> &mut GameState {
        &mut self.game
    }
}

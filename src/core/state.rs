//! Game state shared by every game shape.
//!
//! ## GameState
//!
//! Authoritative per-game data:
//! - Player registry in seat order (join order)
//! - Hands keyed by session, front = next card to act
//! - Status (`Waiting -> Playing -> Completed`, never backwards)
//! - Winner, set only on completion
//! - Action history
//!
//! The engines only touch state through the small mutation primitives
//! below. Every primitive is a discrete edit (one card, one field) so a sync
//! layer can diff it; nothing reassigns a whole collection.
//!
//! Game-specific shapes (`WarState`, `SnapState`) embed a `GameState` and
//! expose it through `AsRef`/`AsMut`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionRecord};
use super::player::{Player, PlayerStatus, SessionId};
use crate::cards::Card;

/// Lifecycle of a game. Ordered: transitions only move forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Playing,
    Completed,
}

/// Common game state.
///
/// Uses `im::Vector` for hands so cloning a state for a snapshot is O(1).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    hands: FxHashMap<SessionId, Vector<Card>>,
    status: GameStatus,
    winner: Option<SessionId>,
    history: Vector<ActionRecord>,
    next_sequence: u32,
}

impl GameState {
    /// Create an empty state with no players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a started game from explicit hands, seated in the given order.
    ///
    /// Used for replays and scripted scenarios where the deal is known.
    #[must_use]
    pub fn from_hands(seats: Vec<(Player, Vec<Card>)>) -> Self {
        let mut state = Self::new();
        for (player, cards) in seats {
            let session = player.session_id.clone();
            state.add_player(player);
            for card in cards {
                state.push_to_hand(&session, card);
            }
        }
        state.start();
        state
    }

    // === Players ===

    /// Seat a player with an empty hand.
    ///
    /// Returns false if the session is already seated.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.has_player(&player.session_id) {
            return false;
        }
        self.hands.insert(player.session_id.clone(), Vector::new());
        self.players.push(player);
        true
    }

    /// Remove a player and their hand.
    pub fn remove_player(&mut self, session: &SessionId) -> Option<Player> {
        let seat = self.seat_of(session)?;
        self.hands.remove(session);
        Some(self.players.remove(seat))
    }

    #[must_use]
    pub fn has_player(&self, session: &SessionId) -> bool {
        self.players.iter().any(|p| &p.session_id == session)
    }

    #[must_use]
    pub fn player(&self, session: &SessionId) -> Option<&Player> {
        self.players.iter().find(|p| &p.session_id == session)
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index (0-based) of a session.
    #[must_use]
    pub fn seat_of(&self, session: &SessionId) -> Option<usize> {
        self.players.iter().position(|p| &p.session_id == session)
    }

    /// Session seated at `seat`.
    #[must_use]
    pub fn session_at(&self, seat: usize) -> Option<&SessionId> {
        self.players.get(seat).map(|p| &p.session_id)
    }

    /// Iterate session IDs in seat order.
    pub fn session_ids(&self) -> impl Iterator<Item = &SessionId> {
        self.players.iter().map(|p| &p.session_id)
    }

    pub fn set_player_status(&mut self, session: &SessionId, status: PlayerStatus) {
        if let Some(player) = self.players.iter_mut().find(|p| &p.session_id == session) {
            player.status = status;
        }
    }

    pub fn set_all_player_status(&mut self, status: PlayerStatus) {
        for player in &mut self.players {
            player.status = status;
        }
    }

    // === Hands ===

    /// A player's hand, front first. Empty for unknown sessions.
    #[must_use]
    pub fn hand(&self, session: &SessionId) -> Vector<Card> {
        self.hands.get(session).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn hand_size(&self, session: &SessionId) -> usize {
        self.hands.get(session).map_or(0, Vector::len)
    }

    /// Append a card to the back of a player's hand.
    ///
    /// Panics if the session is not seated.
    pub fn push_to_hand(&mut self, session: &SessionId, card: Card) {
        match self.hands.get_mut(session) {
            Some(hand) => hand.push_back(card),
            None => {
                tracing::error!(session = %session, "card pushed to a hand that does not exist");
                panic!("no hand for session {session}");
            }
        }
    }

    /// Remove the front card of a player's hand.
    pub fn pop_from_hand(&mut self, session: &SessionId) -> Option<Card> {
        self.hands.get_mut(session)?.pop_front()
    }

    /// Sessions still holding at least one card, in seat order.
    #[must_use]
    pub fn players_with_cards(&self) -> Vec<&SessionId> {
        self.session_ids()
            .filter(|s| self.hand_size(s) > 0)
            .collect()
    }

    /// Total cards across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.hands.values().map(Vector::len).sum()
    }

    // === Status ===

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Move from `Waiting` to `Playing`.
    ///
    /// Returns false (and changes nothing) if the game already started.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Waiting {
            return false;
        }
        self.status = GameStatus::Playing;
        self.set_all_player_status(PlayerStatus::Playing);
        true
    }

    /// Mark the game completed with an optional winner.
    ///
    /// Returns false if it was already completed; the first result sticks.
    pub fn complete(&mut self, winner: Option<SessionId>) -> bool {
        if self.status == GameStatus::Completed {
            return false;
        }
        self.status = GameStatus::Completed;
        self.winner = winner;
        self.set_all_player_status(PlayerStatus::Finished);
        true
    }

    #[must_use]
    pub fn winner(&self) -> Option<&SessionId> {
        self.winner.as_ref()
    }

    // === Action History ===

    /// Record a processed action.
    pub fn record_action(&mut self, player: SessionId, kind: ActionKind, round: u32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history.push_back(ActionRecord {
            player,
            kind,
            round,
            sequence,
        });
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn two_players() -> GameState {
        let mut state = GameState::new();
        state.add_player(Player::new("a", "Alice"));
        state.add_player(Player::new("b", "Bob"));
        state
    }

    #[test]
    fn test_add_player_rejects_duplicates() {
        let mut state = two_players();
        assert!(!state.add_player(Player::new("a", "Alice again")));
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.seat_of(&"b".into()), Some(1));
        assert_eq!(state.session_at(0), Some(&SessionId::new("a")));
    }

    #[test]
    fn test_remove_player() {
        let mut state = two_players();
        let removed = state.remove_player(&"a".into()).unwrap();

        assert_eq!(removed.display_name, "Alice");
        assert_eq!(state.player_count(), 1);
        assert_eq!(state.seat_of(&"b".into()), Some(0));
        assert!(state.remove_player(&"a".into()).is_none());
    }

    #[test]
    fn test_hand_push_pop() {
        let mut state = two_players();
        let a = SessionId::new("a");

        state.push_to_hand(&a, Card::new(Suit::Hearts, 2));
        state.push_to_hand(&a, Card::new(Suit::Hearts, 3));

        assert_eq!(state.hand_size(&a), 2);
        assert_eq!(state.pop_from_hand(&a), Some(Card::new(Suit::Hearts, 2)));
        assert_eq!(state.hand(&a), Vector::from(vec![Card::new(Suit::Hearts, 3)]));
        assert_eq!(state.cards_in_hands(), 1);
        assert_eq!(state.players_with_cards(), vec![&a]);
    }

    #[test]
    fn test_pop_unknown_session() {
        let mut state = two_players();
        assert_eq!(state.pop_from_hand(&"zzz".into()), None);
        assert_eq!(state.hand_size(&"zzz".into()), 0);
    }

    #[test]
    #[should_panic(expected = "no hand for session")]
    fn test_push_unknown_session_panics() {
        let mut state = two_players();
        state.push_to_hand(&"zzz".into(), Card::new(Suit::Clubs, 1));
    }

    #[test]
    fn test_status_is_monotonic() {
        let mut state = two_players();
        assert_eq!(state.status(), GameStatus::Waiting);

        assert!(state.start());
        assert!(state.is_playing());
        assert!(state.players().iter().all(|p| p.status == PlayerStatus::Playing));
        assert!(!state.start());

        assert!(state.complete(Some("a".into())));
        assert!(!state.complete(Some("b".into())));
        assert!(!state.start());

        assert_eq!(state.status(), GameStatus::Completed);
        assert_eq!(state.winner(), Some(&SessionId::new("a")));
        assert!(state.players().iter().all(|p| p.status == PlayerStatus::Finished));
    }

    #[test]
    fn test_record_action_sequences() {
        let mut state = two_players();
        state.record_action("a".into(), ActionKind::FlipCard, 1);
        state.record_action("b".into(), ActionKind::FlipCard, 1);

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence, 0);
        assert_eq!(history[1].sequence, 1);
        assert_eq!(history[1].player, SessionId::new("b"));
    }
}

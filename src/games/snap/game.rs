//! Snap rules engine.

use tracing::{debug, info};

use super::state::SnapState;
use crate::core::{
    Action, ActionKind, ActionOutcome, GameConfig, GameRng, GameType, Player, SessionId,
};
use crate::error::{ActionError, SetupError};
use crate::rules::engine::seat_and_deal;
use crate::rules::RulesEngine;

/// Snap engine. Stateless apart from its configuration.
#[derive(Clone, Debug, Default)]
pub struct SnapGame {
    config: GameConfig,
}

impl SnapGame {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn play_card(&self, state: &mut SnapState, player: &SessionId) -> ActionOutcome {
        let Some(card) = state.game_mut().pop_from_hand(player) else {
            return ActionOutcome::Rejected(ActionError::NoCardsInHand);
        };
        state.push_to_pile(card);
        state.advance_turn();
        let turn = state.turns_played();
        state
            .game_mut()
            .record_action(player.clone(), ActionKind::PlayCard, turn);

        let snap_available = state.snap_available();
        debug!(session = %player, card = %card, snap_available, "played");
        ActionOutcome::Played {
            card,
            snap_available,
        }
    }

    fn snap(&self, state: &mut SnapState, player: &SessionId) -> ActionOutcome {
        state.set_last_snap_attempt(player.clone());
        let turn = state.turns_played();
        state
            .game_mut()
            .record_action(player.clone(), ActionKind::Snap, turn);

        if state.snap_available() {
            let mut cards_won = 0;
            while let Some(card) = state.take_from_pile() {
                state.game_mut().push_to_hand(player, card);
                cards_won += 1;
            }
            info!(session = %player, cards_won, "snap");
            return ActionOutcome::Snapped { cards_won };
        }

        // Penalty: one card from the caller's hand goes onto the pile
        let card = state.game_mut().pop_from_hand(player);
        if let Some(card) = card {
            state.push_to_pile(card);
        }
        debug!(session = %player, penalty = card.is_some(), "false snap");
        ActionOutcome::SnapPenalty { card }
    }
}

impl RulesEngine for SnapGame {
    type State = SnapState;

    fn game_type(&self) -> GameType {
        GameType::Snap
    }

    fn initialize(
        &self,
        state: &mut SnapState,
        players: &[Player],
        rng: &mut GameRng,
    ) -> Result<(), SetupError> {
        seat_and_deal(
            state.game_mut(),
            players,
            self.config.min_players,
            self.config.max_players,
            rng,
        )?;
        state.begin_turns();
        Ok(())
    }

    fn validate_action(&self, state: &SnapState, action: &Action) -> Result<(), ActionError> {
        let game = state.game();
        if !game.is_playing() {
            return Err(ActionError::GameNotInProgress);
        }
        if !matches!(action.kind, ActionKind::PlayCard | ActionKind::Snap) {
            return Err(ActionError::UnknownAction {
                kind: action.kind,
                game: GameType::Snap,
            });
        }
        if !game.has_player(&action.player) {
            return Err(ActionError::UnknownPlayer(action.player.clone()));
        }
        if action.kind == ActionKind::PlayCard {
            if state.current_turn() != Some(&action.player) {
                return Err(ActionError::NotYourTurn);
            }
            if game.hand_size(&action.player) == 0 {
                return Err(ActionError::NoCardsInHand);
            }
        }
        Ok(())
    }

    fn process_action(&self, state: &mut SnapState, action: &Action) -> ActionOutcome {
        if let Err(e) = self.validate_action(state, action) {
            debug!(session = %action.player, error = %e, "action rejected");
            return ActionOutcome::Rejected(e);
        }
        match action.kind {
            ActionKind::PlayCard => self.play_card(state, &action.player),
            ActionKind::Snap => self.snap(state, &action.player),
            ActionKind::FlipCard => ActionOutcome::Rejected(ActionError::UnknownAction {
                kind: action.kind,
                game: GameType::Snap,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit, DECK_SIZE};
    use crate::core::{GameState, GameStatus};

    fn hearts(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(Suit::Hearts, r)).collect()
    }

    fn spades(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(Suit::Spades, r)).collect()
    }

    fn scripted(a: Vec<Card>, b: Vec<Card>) -> SnapState {
        SnapState::from_game(GameState::from_hands(vec![
            (Player::new("a", "Alice"), a),
            (Player::new("b", "Bob"), b),
        ]))
    }

    #[test]
    fn test_initialize() {
        let game = SnapGame::default();
        let mut state = SnapState::new();
        let players = vec![Player::new("a", "Alice"), Player::new("b", "Bob")];

        game.initialize(&mut state, &players, &mut GameRng::new(5)).unwrap();

        assert_eq!(state.game().status(), GameStatus::Playing);
        assert_eq!(state.current_turn(), Some(&SessionId::new("a")));
        assert_eq!(state.total_cards(), DECK_SIZE);
        assert!(!state.snap_available());
    }

    #[test]
    fn test_play_alternates_turns() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[5, 2]), spades(&[7, 3]));

        let outcome = game.process_action(&mut state, &Action::play_card("a"));
        assert_eq!(
            outcome,
            ActionOutcome::Played {
                card: Card::new(Suit::Hearts, 5),
                snap_available: false
            }
        );
        assert_eq!(state.current_turn(), Some(&SessionId::new("b")));

        assert_eq!(
            game.process_action(&mut state, &Action::play_card("a")),
            ActionOutcome::Rejected(ActionError::NotYourTurn)
        );

        game.process_action(&mut state, &Action::play_card("b"));
        assert_eq!(state.current_turn(), Some(&SessionId::new("a")));
        assert_eq!(state.central_pile().len(), 2);
    }

    #[test]
    fn test_snap_wins_pile() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[5, 2]), spades(&[5, 3]));

        game.process_action(&mut state, &Action::play_card("a"));
        let outcome = game.process_action(&mut state, &Action::play_card("b"));
        assert_eq!(
            outcome,
            ActionOutcome::Played {
                card: Card::new(Suit::Spades, 5),
                snap_available: true
            }
        );

        let outcome = game.process_action(&mut state, &Action::snap("a"));
        assert_eq!(outcome, ActionOutcome::Snapped { cards_won: 2 });
        assert_eq!(state.game().hand_size(&"a".into()), 3);
        assert!(state.central_pile().is_empty());
        assert!(!state.snap_available());
        assert_eq!(state.last_snap_attempt(), Some(&SessionId::new("a")));
    }

    #[test]
    fn test_first_snap_wins_race() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[5, 2]), spades(&[5, 3]));

        game.process_action(&mut state, &Action::play_card("a"));
        game.process_action(&mut state, &Action::play_card("b"));

        assert!(game.process_action(&mut state, &Action::snap("b")).is_success());
        let late = game.process_action(&mut state, &Action::snap("a"));

        assert!(!late.is_success());
        assert_eq!(state.game().hand_size(&"b".into()), 3);
        assert_eq!(state.game().hand_size(&"a".into()), 0);
        assert_eq!(state.central_pile().len(), 1);
    }

    #[test]
    fn test_false_snap_penalty() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[5, 2, 9]), spades(&[7, 3]));

        game.process_action(&mut state, &Action::play_card("a"));
        game.process_action(&mut state, &Action::play_card("b"));
        assert!(!state.snap_available());

        let outcome = game.process_action(&mut state, &Action::snap("a"));
        assert_eq!(
            outcome,
            ActionOutcome::SnapPenalty {
                card: Some(Card::new(Suit::Hearts, 2))
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(state.game().hand_size(&"a".into()), 1);
        assert_eq!(state.central_pile().len(), 3);
        assert_eq!(state.last_snap_attempt(), Some(&SessionId::new("a")));
        // Snapping out of turn does not move the turn pointer
        assert_eq!(state.current_turn(), Some(&SessionId::new("a")));
    }

    #[test]
    fn test_false_snap_with_empty_hand() {
        let game = SnapGame::default();
        let mut state = scripted(vec![], spades(&[7, 3]));

        let outcome = game.process_action(&mut state, &Action::snap("a"));
        assert_eq!(outcome, ActionOutcome::SnapPenalty { card: None });
        assert_eq!(state.game().hand_size(&"a".into()), 0);
        assert!(state.central_pile().is_empty());
    }

    #[test]
    fn test_penalty_card_can_create_snap() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[4, 9]), spades(&[9, 3]));

        game.process_action(&mut state, &Action::play_card("a"));
        game.process_action(&mut state, &Action::play_card("b"));
        game.process_action(&mut state, &Action::snap("a"));

        // Penalty 9 landed on the other 9
        assert!(state.snap_available());
    }

    #[test]
    fn test_validation_errors() {
        let game = SnapGame::default();
        let state = scripted(vec![], spades(&[7]));

        assert_eq!(
            game.validate_action(&state, &Action::play_card("a")),
            Err(ActionError::NoCardsInHand)
        );
        assert_eq!(
            game.validate_action(&state, &Action::play_card("b")),
            Err(ActionError::NotYourTurn)
        );
        assert_eq!(
            game.validate_action(&state, &Action::flip_card("a")),
            Err(ActionError::UnknownAction {
                kind: ActionKind::FlipCard,
                game: GameType::Snap
            })
        );
        assert_eq!(
            game.validate_action(&state, &Action::snap("zed")),
            Err(ActionError::UnknownPlayer("zed".into()))
        );
        assert_eq!(game.validate_action(&state, &Action::snap("b")), Ok(()));
    }

    #[test]
    fn test_game_over_when_one_player_holds_cards() {
        let game = SnapGame::default();
        let mut state = scripted(hearts(&[5]), spades(&[7, 3]));

        assert!(!game.is_game_over(&state));
        game.process_action(&mut state, &Action::play_card("a"));

        assert!(game.is_game_over(&state));
        assert_eq!(game.winner(&state), Some(SessionId::new("b")));
        assert_eq!(state.total_cards(), 3);
    }
}

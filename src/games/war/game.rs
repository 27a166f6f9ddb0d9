//! War rules engine.

use std::cmp::Ordering;

use tracing::{debug, error, info};

use super::state::WarState;
use crate::cards::Card;
use crate::core::{
    Action, ActionKind, ActionOutcome, BattleOutcome, GameConfig, GameRng, GameStatus, GameType,
    Player, PlayerStatus, SessionId,
};
use crate::error::{ActionError, SetupError};
use crate::rules::engine::seat_and_deal;
use crate::rules::RulesEngine;

/// War engine. Stateless apart from its configuration.
#[derive(Clone, Debug, Default)]
pub struct WarGame {
    config: GameConfig,
}

impl WarGame {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Resolve a completed round. Loops until the tie chain is broken.
    fn resolve_battle(&self, state: &mut WarState) -> BattleOutcome {
        let (first, second) = match state.game().players() {
            [a, b] => (a.session_id.clone(), b.session_id.clone()),
            players => {
                error!(seated = players.len(), "battle resolution needs exactly two players");
                panic!("battle resolution with {} players", players.len());
            }
        };

        let mut wars = 0;
        let outcome = loop {
            let (a, b) = match (state.last_card_for_seat(0), state.last_card_for_seat(1)) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    error!(pile = state.battle_pile().len(), "battle pile is missing a player's card");
                    panic!("battle pile is missing a player's card");
                }
            };

            match a.rank().cmp(&b.rank()) {
                Ordering::Greater => break award_pile(state, &first, wars),
                Ordering::Less => break award_pile(state, &second, wars),
                Ordering::Equal => {
                    wars += 1;
                    state.enter_war();
                    info!(depth = state.war_depth(), rank = a.rank(), "war");

                    let needed = self.config.war_face_down_cards + 1;
                    let have_first = state.game().hand_size(&first);
                    let have_second = state.game().hand_size(&second);
                    if have_first >= needed && have_second >= needed {
                        commit_war_cards(state, &first, &second, needed);
                        continue;
                    }

                    // Someone cannot cover the war. The shorter hand loses;
                    // equal hands go all in, and a tie with nothing left is a draw.
                    break match have_first.cmp(&have_second) {
                        Ordering::Less => forfeit(state, &second, &first, wars),
                        Ordering::Greater => forfeit(state, &first, &second, wars),
                        Ordering::Equal if have_first > 0 => {
                            commit_war_cards(state, &first, &second, have_first);
                            continue;
                        }
                        Ordering::Equal => draw_battle(state, &first, &second, wars),
                    };
                }
            }
        };

        state.finish_round();
        if let BattleOutcome::Drawn { .. } = outcome {
            state.game_mut().complete(None);
        } else {
            state.game_mut().set_all_player_status(PlayerStatus::Playing);
        }
        info!(round = state.round_number(), outcome = ?outcome, "battle resolved");
        outcome
    }
}

impl RulesEngine for WarGame {
    type State = WarState;

    fn game_type(&self) -> GameType {
        GameType::War
    }

    fn initialize(
        &self,
        state: &mut WarState,
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
        state.begin_rounds();
        Ok(())
    }

    fn validate_action(&self, state: &WarState, action: &Action) -> Result<(), ActionError> {
        let game = state.game();
        if !game.is_playing() {
            return Err(ActionError::GameNotInProgress);
        }
        if action.kind != ActionKind::FlipCard {
            return Err(ActionError::UnknownAction {
                kind: action.kind,
                game: GameType::War,
            });
        }
        if !game.has_player(&action.player) {
            return Err(ActionError::UnknownPlayer(action.player.clone()));
        }
        if game.hand_size(&action.player) == 0 {
            return Err(ActionError::NoCardsInHand);
        }
        if state.is_ready(&action.player) {
            return Err(ActionError::AlreadyFlipped);
        }
        Ok(())
    }

    fn process_action(&self, state: &mut WarState, action: &Action) -> ActionOutcome {
        if let Err(e) = self.validate_action(state, action) {
            debug!(session = %action.player, error = %e, "flip rejected");
            return ActionOutcome::Rejected(e);
        }
        let player = &action.player;
        let (Some(seat), Some(card)) = (
            state.game().seat_of(player),
            state.game_mut().pop_from_hand(player),
        ) else {
            return ActionOutcome::Rejected(ActionError::NoCardsInHand);
        };

        let card = card.with_face_up(true);
        state.place_flip(seat, card);
        state.mark_ready(player.clone());
        let round = state.round_number();
        let game = state.game_mut();
        game.set_player_status(player, PlayerStatus::Ready);
        game.record_action(player.clone(), ActionKind::FlipCard, round);
        debug!(session = %player, card = %card, round, "flipped");

        let battle = if state.ready_count() == state.game().player_count() {
            Some(self.resolve_battle(state))
        } else {
            None
        };

        ActionOutcome::Flipped { card, battle }
    }

    /// Over when at most one player holds cards and no battle is in flight.
    fn is_game_over(&self, state: &WarState) -> bool {
        let game = state.game();
        match game.status() {
            GameStatus::Waiting => false,
            GameStatus::Completed => true,
            GameStatus::Playing => {
                state.battle_pile().is_empty() && game.players_with_cards().len() <= 1
            }
        }
    }
}

fn take_front(state: &mut WarState, session: &SessionId) -> Card {
    match state.game_mut().pop_from_hand(session) {
        Some(card) => card,
        None => {
            error!(session = %session, "hand emptied during war commit");
            panic!("hand of {session} emptied during war commit");
        }
    }
}

/// Each player lays `needed - 1` face-down cards and one face-up card,
/// interleaved so the pile keeps its seat parity.
fn commit_war_cards(state: &mut WarState, first: &SessionId, second: &SessionId, needed: usize) {
    for i in 0..needed {
        let face_up = i + 1 == needed;
        let a = take_front(state, first).with_face_up(face_up);
        state.push_to_pile(a);
        let b = take_front(state, second).with_face_up(face_up);
        state.push_to_pile(b);
    }
}

fn give_pile_to(state: &mut WarState, winner: &SessionId) -> usize {
    let mut moved = 0;
    while let Some(card) = state.take_from_pile() {
        state.game_mut().push_to_hand(winner, card.with_face_up(false));
        moved += 1;
    }
    moved
}

fn award_pile(state: &mut WarState, winner: &SessionId, wars: u32) -> BattleOutcome {
    let cards_won = give_pile_to(state, winner);
    BattleOutcome::Won {
        winner: winner.clone(),
        cards_won,
        wars,
    }
}

fn forfeit(state: &mut WarState, winner: &SessionId, loser: &SessionId, wars: u32) -> BattleOutcome {
    let mut cards_won = give_pile_to(state, winner);
    while let Some(card) = state.game_mut().pop_from_hand(loser) {
        state.game_mut().push_to_hand(winner, card);
        cards_won += 1;
    }
    info!(winner = %winner, loser = %loser, cards_won, "war forfeited for lack of cards");
    BattleOutcome::Forfeited {
        winner: winner.clone(),
        loser: loser.clone(),
        cards_won,
        wars,
    }
}

/// Hand every card back to the seat that contributed it.
fn draw_battle(
    state: &mut WarState,
    first: &SessionId,
    second: &SessionId,
    wars: u32,
) -> BattleOutcome {
    let mut index = 0;
    while let Some(card) = state.take_from_pile() {
        let owner = if index % 2 == 0 { first } else { second };
        state.game_mut().push_to_hand(owner, card.with_face_up(false));
        index += 1;
    }
    info!(wars, "war tied with both hands empty");
    BattleOutcome::Drawn { wars }
}

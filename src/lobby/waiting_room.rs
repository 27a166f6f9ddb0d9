//! The waiting room and its scheduler pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::MatchmakerConfig;
use super::matchmaker::{MatchId, MatchResult, Matchmaker};
use super::state::{LobbyState, LobbyStatus, WaitingPlayer};
use crate::core::{GameType, SessionId};
use crate::error::LobbyError;

/// Message pushed to a lobby client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyMessage {
    Matched {
        match_id: MatchId,
        opponent_session_id: SessionId,
        matched_at: DateTime<Utc>,
    },
    Timeout {
        reason: String,
    },
}

/// A message and who it is for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyNotice {
    pub recipient: SessionId,
    pub message: LobbyMessage,
}

/// Everything one `tick` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Notices in emission order: timeouts first, then match pairs.
    pub notices: Vec<LobbyNotice>,
    /// Matches made; the caller opens a room for each.
    pub matches: Vec<MatchResult>,
    pub timed_out: Vec<SessionId>,
}

/// Lobby: waiting entries plus the matchmaker that pairs them.
#[derive(Clone, Debug, Default)]
pub struct Lobby {
    state: LobbyState,
    matchmaker: Matchmaker,
}

impl Lobby {
    pub fn new(config: MatchmakerConfig) -> Self {
        Self {
            state: LobbyState::new(),
            matchmaker: Matchmaker::new(config),
        }
    }

    #[must_use]
    pub fn state(&self) -> &LobbyState {
        &self.state
    }

    #[must_use]
    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    /// Register a waiting player now.
    pub fn join(
        &mut self,
        session_id: SessionId,
        name: impl Into<String>,
        game_type: GameType,
    ) -> Result<(), LobbyError> {
        self.join_at(session_id, name, game_type, Utc::now())
    }

    /// Register a waiting player with an explicit join time.
    pub fn join_at(
        &mut self,
        session_id: SessionId,
        name: impl Into<String>,
        game_type: GameType,
        joined_at: DateTime<Utc>,
    ) -> Result<(), LobbyError> {
        if self.state.contains(&session_id) {
            return Err(LobbyError::AlreadyWaiting(session_id));
        }
        debug!(session = %session_id, game = %game_type, "joined lobby");
        self.state.insert(session_id, name, game_type, joined_at);
        Ok(())
    }

    pub fn leave(&mut self, session: &SessionId) -> Result<WaitingPlayer, LobbyError> {
        let entry = self
            .state
            .remove(session)
            .ok_or_else(|| LobbyError::UnknownPlayer(session.clone()))?;
        debug!(session = %session, "left lobby");
        Ok(entry)
    }

    /// Keep the entry but exclude it from matching until the next tick
    /// purges it.
    pub fn mark_disconnected(&mut self, session: &SessionId) -> Result<(), LobbyError> {
        if !self.state.set_status(session, LobbyStatus::Disconnected) {
            return Err(LobbyError::UnknownPlayer(session.clone()));
        }
        debug!(session = %session, "lobby connection lost");
        Ok(())
    }

    /// One scheduler pass at `now`.
    ///
    /// Evicts timed-out players, then marks pairs `Matched` until no pair
    /// remains, then drops every entry that is no longer waiting.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();

        let timeout = self.matchmaker.config().timeout();
        for session in self.matchmaker.timed_out_players_at(&self.state, now) {
            self.state.remove(&session);
            info!(session = %session, timeout = ?timeout, "matchmaking timed out");
            report.notices.push(LobbyNotice {
                recipient: session.clone(),
                message: LobbyMessage::Timeout {
                    reason: format!("no opponent found within {timeout:?}"),
                },
            });
            report.timed_out.push(session);
        }

        while let Some(result) = self.matchmaker.find_match_at(&self.state, now) {
            let [first, second] = result.sessions();
            self.state.set_status(first, LobbyStatus::Matched);
            self.state.set_status(second, LobbyStatus::Matched);
            info!(
                match_id = %result.match_id,
                player1 = %first,
                player2 = %second,
                game = %result.game_type,
                "match made"
            );
            report.notices.push(matched_notice(&result, first, second));
            report.notices.push(matched_notice(&result, second, first));
            report.matches.push(result);
        }

        let settled: Vec<SessionId> = self
            .state
            .iter()
            .filter(|e| !e.is_waiting())
            .map(|e| e.session_id.clone())
            .collect();
        for session in settled {
            if let Some(entry) = self.state.remove(&session) {
                debug!(session = %session, status = ?entry.status, "lobby entry removed");
            }
        }

        report
    }
}

fn matched_notice(result: &MatchResult, recipient: &SessionId, opponent: &SessionId) -> LobbyNotice {
    LobbyNotice {
        recipient: recipient.clone(),
        message: LobbyMessage::Matched {
            match_id: result.match_id,
            opponent_session_id: opponent.clone(),
            matched_at: result.matched_at,
        },
    }
}

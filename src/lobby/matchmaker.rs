//! FIFO pairing of waiting players and timeout detection.
//!
//! The matchmaker is a pure view over `LobbyState`: it never mutates the
//! lobby. `Lobby::tick` applies its decisions.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::config::MatchmakerConfig;
use super::state::{LobbyState, WaitingPlayer};
use crate::core::{GameType, Player, SessionId};

/// Unique identifier for a made match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two players paired for one game. `player1` joined first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub player1: WaitingPlayer,
    pub player2: WaitingPlayer,
    pub game_type: GameType,
    pub matched_at: DateTime<Utc>,
}

impl MatchResult {
    /// Both session ids, in join order.
    #[must_use]
    pub fn sessions(&self) -> [&SessionId; 2] {
        [&self.player1.session_id, &self.player2.session_id]
    }

    /// Room seats for the two players, in join order.
    #[must_use]
    pub fn players(&self) -> [Player; 2] {
        [&self.player1, &self.player2].map(|entry| {
            Player::new(entry.session_id.clone(), entry.name.clone())
                .with_joined_at(entry.joined_at)
        })
    }
}

/// Pairs waiting players by game type in join order.
#[derive(Clone, Debug, Default)]
pub struct Matchmaker {
    config: MatchmakerConfig,
}

impl Matchmaker {
    pub fn new(config: MatchmakerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchmakerConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.config.timeout_ms).unwrap_or(i64::MAX))
    }

    /// Strictly longer than the timeout; waiting exactly the timeout is fine.
    #[must_use]
    pub fn is_timed_out(&self, entry: &WaitingPlayer, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.joined_at) > self.timeout()
    }

    /// Pair the two earliest eligible players of one game type.
    #[must_use]
    pub fn find_match(&self, lobby: &LobbyState) -> Option<MatchResult> {
        self.find_match_at(lobby, Utc::now())
    }

    /// `find_match` against an explicit clock.
    ///
    /// Eligible players are waiting and not timed out. When several game
    /// types have a pair available, the one whose earliest player joined
    /// first wins.
    #[must_use]
    pub fn find_match_at(&self, lobby: &LobbyState, now: DateTime<Utc>) -> Option<MatchResult> {
        let mut groups: FxHashMap<GameType, Vec<&WaitingPlayer>> = FxHashMap::default();
        for entry in lobby.waiting().filter(|e| !self.is_timed_out(e, now)) {
            groups.entry(entry.game_type).or_default().push(entry);
        }

        let (game_type, queue) = groups
            .into_iter()
            .filter(|(_, queue)| queue.len() >= 2)
            .map(|(game_type, mut queue)| {
                queue.sort_by_key(|e| queue_key(e));
                (game_type, queue)
            })
            .min_by_key(|(_, queue)| queue_key(queue[0]))?;

        let result = MatchResult {
            match_id: MatchId::new(),
            player1: queue[0].clone(),
            player2: queue[1].clone(),
            game_type,
            matched_at: now,
        };
        debug!(
            match_id = %result.match_id,
            player1 = %result.player1.session_id,
            player2 = %result.player2.session_id,
            game = %game_type,
            "match found"
        );
        Some(result)
    }

    /// Waiting players that have exceeded the timeout.
    #[must_use]
    pub fn timed_out_players(&self, lobby: &LobbyState) -> Vec<SessionId> {
        self.timed_out_players_at(lobby, Utc::now())
    }

    /// `timed_out_players` against an explicit clock, in join order.
    #[must_use]
    pub fn timed_out_players_at(&self, lobby: &LobbyState, now: DateTime<Utc>) -> Vec<SessionId> {
        let mut expired: Vec<&WaitingPlayer> = lobby
            .waiting()
            .filter(|e| self.is_timed_out(e, now))
            .collect();
        expired.sort_by_key(|e| queue_key(e));
        expired.into_iter().map(|e| e.session_id.clone()).collect()
    }
}

fn queue_key(entry: &WaitingPlayer) -> (DateTime<Utc>, u64) {
    (entry.joined_at, entry.ticket)
}

//! Game configuration types.
//!
//! - `GameType`: The key used to pick a rules engine when a room is created
//! - `GameConfig`: Seat limits and rule knobs shared by the engines
//!
//! Configs are plain serde structs so the orchestration layer can load them
//! from whatever format it uses.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    War,
    Snap,
}

impl GameType {
    /// All game types.
    pub const ALL: [GameType; 2] = [GameType::War, GameType::Snap];

    /// Lowercase key, as used on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            GameType::War => "war",
            GameType::Snap => "snap",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for unrecognised game type keys.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown game type: {0}")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGameType(s.to_string()))
    }
}

/// Per-game configuration.
///
/// ## Defaults
///
/// - `min_players`: 2 (dealing starts once this many are seated)
/// - `max_players`: 2
/// - `war_face_down_cards`: 3 (face-down cards each player commits per war)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub war_face_down_cards: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 2,
            war_face_down_cards: 3,
        }
    }
}

impl GameConfig {
    /// Set the number of face-down cards committed per war.
    #[must_use]
    pub fn with_war_face_down_cards(mut self, count: usize) -> Self {
        self.war_face_down_cards = count;
        self
    }

    /// Set seat limits.
    ///
    /// Both games are strictly two-player; other limits are rejected.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 2, "Must require at least 2 players");
        assert!(max == 2, "Only two-player games are supported");
        assert!(min <= max, "min_players must not exceed max_players");
        self.min_players = min;
        self.max_players = max;
        self
    }
}

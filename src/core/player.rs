//! Player identity and in-game player records.
//!
//! ## SessionId
//!
//! The external, connection-scoped identity of a player. It is the join key
//! between the lobby, a game's state and the network session, and is never
//! reused while that connection's data is live.
//!
//! ## Player
//!
//! A seated player: identity, display name, join time and in-game status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection-scoped player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a seated player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Seated, game not started.
    #[default]
    Waiting,
    /// Has acted this round and is waiting for the opponent (War).
    Ready,
    /// Game in progress.
    Playing,
    /// Game over.
    Finished,
}

/// A player seated in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub session_id: SessionId,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
    pub status: PlayerStatus,
}

impl Player {
    /// Create a waiting player that joined now.
    #[must_use]
    pub fn new(session_id: impl Into<SessionId>, display_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            display_name: display_name.into(),
            joined_at: Utc::now(),
            status: PlayerStatus::Waiting,
        }
    }

    /// Override the join timestamp.
    #[must_use]
    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_basics() {
        let id = SessionId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(format!("{}", id), "abc");
        assert_eq!(SessionId::from("abc"), id);
        assert_eq!(SessionId::from(String::from("abc")), id);
    }

    #[test]
    fn test_session_id_serializes_as_string() {
        let json = serde_json::to_string(&SessionId::new("s-1")).unwrap();
        assert_eq!(json, "\"s-1\"");
    }

    #[test]
    fn test_new_player_is_waiting() {
        let player = Player::new("s-1", "Alice");
        assert_eq!(player.session_id, SessionId::new("s-1"));
        assert_eq!(player.display_name, "Alice");
        assert_eq!(player.status, PlayerStatus::Waiting);
    }

    #[test]
    fn test_with_joined_at() {
        let at = DateTime::<Utc>::from_timestamp(1_000, 0).unwrap();
        let player = Player::new("s-1", "Alice").with_joined_at(at);
        assert_eq!(player.joined_at, at);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PlayerStatus::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
    }
}

//! Waiting-room records keyed by session.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameType, SessionId};

/// Lifecycle of a lobby entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LobbyStatus {
    Waiting,
    Matched,
    Disconnected,
}

/// One player waiting for an opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingPlayer {
    pub session_id: SessionId,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    pub status: LobbyStatus,
    pub game_type: GameType,
    /// Insertion order; breaks `joined_at` ties.
    pub ticket: u64,
}

impl WaitingPlayer {
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.status == LobbyStatus::Waiting
    }
}

/// All lobby entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LobbyState {
    entries: FxHashMap<SessionId, WaitingPlayer>,
    next_ticket: u64,
}

impl LobbyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waiting entry. Returns `false` if the session is already present.
    pub fn insert(
        &mut self,
        session_id: SessionId,
        name: impl Into<String>,
        game_type: GameType,
        joined_at: DateTime<Utc>,
    ) -> bool {
        if self.entries.contains_key(&session_id) {
            return false;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.entries.insert(
            session_id.clone(),
            WaitingPlayer {
                session_id,
                name: name.into(),
                joined_at,
                status: LobbyStatus::Waiting,
                game_type,
                ticket,
            },
        );
        true
    }

    pub fn remove(&mut self, session: &SessionId) -> Option<WaitingPlayer> {
        self.entries.remove(session)
    }

    #[must_use]
    pub fn get(&self, session: &SessionId) -> Option<&WaitingPlayer> {
        self.entries.get(session)
    }

    #[must_use]
    pub fn contains(&self, session: &SessionId) -> bool {
        self.entries.contains_key(session)
    }

    /// Returns `false` if the session is unknown.
    pub fn set_status(&mut self, session: &SessionId, status: LobbyStatus) -> bool {
        match self.entries.get_mut(session) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &WaitingPlayer> {
        self.entries.values()
    }

    /// Entries still waiting for a match.
    pub fn waiting(&self) -> impl Iterator<Item = &WaitingPlayer> {
        self.entries.values().filter(|e| e.is_waiting())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut lobby = LobbyState::new();
        let now = Utc::now();

        assert!(lobby.insert("a".into(), "Alice", GameType::War, now));
        assert!(!lobby.insert("a".into(), "Alice again", GameType::Snap, now));
        assert_eq!(lobby.len(), 1);
        assert_eq!(lobby.get(&"a".into()).unwrap().name, "Alice");
    }

    #[test]
    fn test_tickets_increase() {
        let mut lobby = LobbyState::new();
        let now = Utc::now();
        lobby.insert("a".into(), "Alice", GameType::War, now);
        lobby.insert("b".into(), "Bob", GameType::War, now);

        let a = lobby.get(&"a".into()).unwrap().ticket;
        let b = lobby.get(&"b".into()).unwrap().ticket;
        assert!(a < b);
    }

    #[test]
    fn test_status_filters_waiting() {
        let mut lobby = LobbyState::new();
        let now = Utc::now();
        lobby.insert("a".into(), "Alice", GameType::War, now);
        lobby.insert("b".into(), "Bob", GameType::War, now);

        assert!(lobby.set_status(&"a".into(), LobbyStatus::Disconnected));
        assert!(!lobby.set_status(&"zed".into(), LobbyStatus::Matched));

        let waiting: Vec<_> = lobby.waiting().map(|e| e.session_id.clone()).collect();
        assert_eq!(waiting, vec![SessionId::new("b")]);
    }
}

//! Lobby matchmaking and timeout sweeps.

use chrono::{DateTime, Duration, Utc};
use duel_cards::core::{GameType, SessionId};
use duel_cards::lobby::{Lobby, LobbyMessage, MatchmakerConfig};
use proptest::prelude::*;

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
}

fn session(i: usize) -> SessionId {
    SessionId::new(format!("p{i}"))
}

#[test]
fn test_timeout_boundary() {
    let mut lobby = Lobby::new(MatchmakerConfig::default());
    lobby.join_at("a".into(), "Alice", GameType::War, at(0)).unwrap();

    let exact = lobby.tick(at(60_000));
    assert!(exact.timed_out.is_empty());
    assert!(lobby.state().contains(&"a".into()));

    let over = lobby.tick(at(60_001));
    assert_eq!(over.timed_out, vec![SessionId::new("a")]);
    assert!(lobby.state().is_empty());
}

#[test]
fn test_custom_timeout() {
    let config = MatchmakerConfig::default().with_timeout(std::time::Duration::from_secs(5));
    let mut lobby = Lobby::new(config);
    lobby.join_at("a".into(), "Alice", GameType::Snap, at(0)).unwrap();

    let report = lobby.tick(at(5_001));
    match &report.notices[0].message {
        LobbyMessage::Timeout { reason } => assert!(reason.contains("5s")),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[test]
fn test_groups_by_game_type() {
    let mut lobby = Lobby::default();
    lobby.join_at("w1".into(), "W1", GameType::War, at(0)).unwrap();
    lobby.join_at("s1".into(), "S1", GameType::Snap, at(1)).unwrap();
    lobby.join_at("w2".into(), "W2", GameType::War, at(2)).unwrap();
    lobby.join_at("s2".into(), "S2", GameType::Snap, at(3)).unwrap();

    let report = lobby.tick(at(10));

    assert_eq!(report.matches.len(), 2);
    for result in &report.matches {
        assert_eq!(result.player1.game_type, result.game_type);
        assert_eq!(result.player2.game_type, result.game_type);
    }
    assert_eq!(report.matches[0].game_type, GameType::War);
    assert_eq!(report.matches[1].game_type, GameType::Snap);
}

#[test]
fn test_match_ids_unique_across_ticks() {
    let mut lobby = Lobby::default();
    let mut ids = Vec::new();
    for round in 0..20 {
        let base = round * 10;
        lobby.join_at(session(base), "x", GameType::War, at(base as i64)).unwrap();
        lobby.join_at(session(base + 1), "y", GameType::War, at(base as i64)).unwrap();
        let report = lobby.tick(at(base as i64 + 1));
        ids.extend(report.matches.into_iter().map(|m| m.match_id));
    }

    let mut unique = ids.clone();
    unique.sort_by_key(|id| *id.as_uuid());
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_notice_json() {
    let mut lobby = Lobby::default();
    lobby.join_at("a".into(), "Alice", GameType::War, at(0)).unwrap();
    lobby.join_at("b".into(), "Bob", GameType::War, at(1)).unwrap();

    let report = lobby.tick(at(2));
    let json = serde_json::to_value(&report.notices[0]).unwrap();

    assert_eq!(json["recipient"], "a");
    assert_eq!(json["message"]["type"], "matched");
    assert_eq!(json["message"]["opponent_session_id"], "b");
    assert_eq!(
        json["message"]["match_id"],
        report.matches[0].match_id.to_string()
    );
}

#[test]
fn test_rejoin_after_timeout() {
    let mut lobby = Lobby::default();
    lobby.join_at("a".into(), "Alice", GameType::War, at(0)).unwrap();
    lobby.tick(at(0) + Duration::seconds(61));

    lobby.join_at("a".into(), "Alice", GameType::War, at(61_000)).unwrap();
    assert!(lobby.state().contains(&"a".into()));
}

proptest! {
    /// Pairs come out in join order no matter the order of insertion.
    #[test]
    fn prop_fifo_independent_of_insertion_order(
        order in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let mut lobby = Lobby::default();
        for i in order {
            lobby
                .join_at(session(i), format!("player {i}"), GameType::War, at(i as i64 * 100))
                .unwrap();
        }

        let report = lobby.tick(at(1_000));

        prop_assert_eq!(report.matches.len(), 4);
        for (n, result) in report.matches.iter().enumerate() {
            prop_assert_eq!(&result.player1.session_id, &session(2 * n));
            prop_assert_eq!(&result.player2.session_id, &session(2 * n + 1));
        }
        prop_assert!(lobby.state().is_empty());
    }
}

//! Actions, their outcomes, and the action history record.
//!
//! An `Action` is a verb plus the acting player. The player always comes
//! from the caller's authenticated session, never from the client payload.
//! None of the verbs carry a payload.
//!
//! `ActionOutcome` is what `process_action` reports. Note that a failed
//! snap (`SnapPenalty`) is *not* a success but does change state; it is
//! distinct from `Rejected`, which never does.

use serde::{Deserialize, Serialize};

use super::player::SessionId;
use crate::cards::Card;
use crate::error::ActionError;

/// Action vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// War: flip the front card onto the battle pile.
    FlipCard,
    /// Snap: play the front card onto the central pile.
    PlayCard,
    /// Snap: claim the central pile.
    Snap,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::FlipCard => "FLIP_CARD",
            ActionKind::PlayCard => "PLAY_CARD",
            ActionKind::Snap => "SNAP",
        };
        f.write_str(name)
    }
}

/// A player's action.
///
/// ```
/// use duel_cards::core::{Action, ActionKind};
///
/// let action = Action::flip_card("session-1");
/// assert_eq!(action.kind, ActionKind::FlipCard);
/// assert_eq!(action.player.as_str(), "session-1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub player: SessionId,
}

impl Action {
    #[must_use]
    pub fn new(kind: ActionKind, player: impl Into<SessionId>) -> Self {
        Self {
            kind,
            player: player.into(),
        }
    }

    #[must_use]
    pub fn flip_card(player: impl Into<SessionId>) -> Self {
        Self::new(ActionKind::FlipCard, player)
    }

    #[must_use]
    pub fn play_card(player: impl Into<SessionId>) -> Self {
        Self::new(ActionKind::PlayCard, player)
    }

    #[must_use]
    pub fn snap(player: impl Into<SessionId>) -> Self {
        Self::new(ActionKind::Snap, player)
    }
}

/// How a War battle ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The higher card took the pile.
    Won {
        winner: SessionId,
        cards_won: usize,
        wars: u32,
    },
    /// A player could not cover a war and surrendered their hand.
    Forfeited {
        winner: SessionId,
        loser: SessionId,
        cards_won: usize,
        wars: u32,
    },
    /// Both players ran out of cards still tied. Contributions go back to
    /// their owners and the game ends in a draw.
    Drawn { wars: u32 },
}

impl BattleOutcome {
    /// The player who took the pile, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&SessionId> {
        match self {
            BattleOutcome::Won { winner, .. } | BattleOutcome::Forfeited { winner, .. } => {
                Some(winner)
            }
            BattleOutcome::Drawn { .. } => None,
        }
    }

    /// Number of wars fought before the battle resolved.
    #[must_use]
    pub fn wars(&self) -> u32 {
        match self {
            BattleOutcome::Won { wars, .. }
            | BattleOutcome::Forfeited { wars, .. }
            | BattleOutcome::Drawn { wars } => *wars,
        }
    }
}

/// Result of `process_action`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// War flip. `battle` is set when this flip completed the round.
    Flipped {
        card: Card,
        battle: Option<BattleOutcome>,
    },
    /// Snap play.
    Played { card: Card, snap_available: bool },
    /// Successful snap.
    Snapped { cards_won: usize },
    /// Failed snap: `card` is the penalty card moved onto the pile.
    SnapPenalty { card: Option<Card> },
    /// Action rejected; state untouched.
    Rejected(ActionError),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            ActionOutcome::SnapPenalty { .. } | ActionOutcome::Rejected(_)
        )
    }

    /// Error to surface to the acting client, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match self {
            ActionOutcome::Rejected(e) => Some(e.to_string()),
            ActionOutcome::SnapPenalty { .. } => Some("no snap available".to_string()),
            _ => None,
        }
    }
}

/// A processed action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: SessionId,

    /// The action taken.
    pub kind: ActionKind,

    /// Round (War) or turn count (Snap) when the action was taken.
    pub round: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_constructors() {
        assert_eq!(Action::flip_card("a").kind, ActionKind::FlipCard);
        assert_eq!(Action::play_card("a").kind, ActionKind::PlayCard);
        assert_eq!(Action::snap("a").kind, ActionKind::Snap);
        assert_eq!(Action::snap("a").player, SessionId::new("a"));
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActionKind::FlipCard).unwrap(),
            "\"FLIP_CARD\""
        );
        assert_eq!(ActionKind::PlayCard.to_string(), "PLAY_CARD");
        let kind: ActionKind = serde_json::from_str("\"SNAP\"").unwrap();
        assert_eq!(kind, ActionKind::Snap);
    }

    #[test]
    fn test_outcome_success() {
        let card = Card::new(Suit::Hearts, 3);

        assert!(ActionOutcome::Played {
            card,
            snap_available: false
        }
        .is_success());
        assert!(ActionOutcome::Snapped { cards_won: 4 }.is_success());
        assert!(!ActionOutcome::SnapPenalty { card: Some(card) }.is_success());
        assert!(!ActionOutcome::Rejected(ActionError::NotYourTurn).is_success());

        assert_eq!(
            ActionOutcome::Rejected(ActionError::NotYourTurn).error(),
            Some("not your turn".to_string())
        );
        assert_eq!(ActionOutcome::Snapped { cards_won: 2 }.error(), None);
    }

    #[test]
    fn test_battle_outcome_accessors() {
        let won = BattleOutcome::Won {
            winner: SessionId::new("a"),
            cards_won: 2,
            wars: 0,
        };
        assert_eq!(won.winner(), Some(&SessionId::new("a")));
        assert_eq!(won.wars(), 0);

        let drawn = BattleOutcome::Drawn { wars: 2 };
        assert_eq!(drawn.winner(), None);
        assert_eq!(drawn.wars(), 2);
    }
}

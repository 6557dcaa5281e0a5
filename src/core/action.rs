//! Player actions.
//!
//! `Action` is a closed sum type internally tagged by `"type"`, so its JSON
//! form is exactly the payload the orchestrator submits:
//!
//! ```
//! use grid_heist::core::{Action, Direction};
//!
//! let action: Action = serde_json::from_str(r#"{"type":"move","dir":"E"}"#).unwrap();
//! assert_eq!(action, Action::Move { dir: Direction::E });
//! ```
//!
//! Every consumer matches exhaustively, so adding a variant forces the
//! rules, the resolver and the summaries to handle it.

use serde::{Deserialize, Serialize};

use super::coord::Direction;
use super::player::PlayerId;

/// Reason codes attached to engine-produced `Noop`s.
pub mod reasons {
    pub const TRAPPED: &str = "trapped";
    pub const MISSING_ACTION: &str = "missing_action";
    pub const INVALID_ACTION_SCHEMA: &str = "invalid_action_schema";
    pub const UNKNOWN_ACTION_TYPE: &str = "unknown_action_type";
    pub const ILLEGAL_ACTION: &str = "illegal_action";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const EMPTY_RESPONSE: &str = "empty_response";
    pub const OCCUPIED: &str = "occupied";
}

/// A single player's intent for one round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Move {
        dir: Direction,
    },
    Collect,
    OpenVault,
    Scan,
    SetTrap {
        dir: Direction,
    },
    Steal {
        target_player_id: PlayerId,
    },
    /// Table talk. Never affects resolution; the fields are carried for the
    /// deal layer and logs.
    Negotiate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        propose_deal_to: Option<PlayerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        terms: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accept_deal_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reject_deal_id: Option<String>,
    },
    Noop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Action {
    /// A `Noop` carrying a reason code.
    #[must_use]
    pub fn noop(reason: impl Into<String>) -> Self {
        Action::Noop {
            reason: Some(reason.into()),
        }
    }

    /// A `Noop` without a reason.
    #[must_use]
    pub fn idle() -> Self {
        Action::Noop { reason: None }
    }

    /// A `Negotiate` with only a message.
    #[must_use]
    pub fn say(message: impl Into<String>) -> Self {
        Action::Negotiate {
            message: Some(message.into()),
            propose_deal_to: None,
            terms: None,
            accept_deal_id: None,
            reject_deal_id: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move { .. } => ActionKind::Move,
            Action::Collect => ActionKind::Collect,
            Action::OpenVault => ActionKind::OpenVault,
            Action::Scan => ActionKind::Scan,
            Action::SetTrap { .. } => ActionKind::SetTrap,
            Action::Steal { .. } => ActionKind::Steal,
            Action::Negotiate { .. } => ActionKind::Negotiate,
            Action::Noop { .. } => ActionKind::Noop,
        }
    }

    /// The reason code of a `Noop`, if any.
    #[must_use]
    pub fn noop_reason(&self) -> Option<&str> {
        match self {
            Action::Noop { reason } => reason.as_deref(),
            _ => None,
        }
    }
}

/// Fieldless tag of an `Action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Move,
    Collect,
    OpenVault,
    Scan,
    SetTrap,
    Steal,
    Negotiate,
    Noop,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Move,
        ActionKind::Collect,
        ActionKind::OpenVault,
        ActionKind::Scan,
        ActionKind::SetTrap,
        ActionKind::Steal,
        ActionKind::Negotiate,
        ActionKind::Noop,
    ];

    /// The wire `"type"` tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Collect => "collect",
            ActionKind::OpenVault => "open_vault",
            ActionKind::Scan => "scan",
            ActionKind::SetTrap => "set_trap",
            ActionKind::Steal => "steal",
            ActionKind::Negotiate => "negotiate",
            ActionKind::Noop => "noop",
        }
    }

    /// Look up a kind by its wire tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_shapes() {
        let cases = [
            (Action::Move { dir: Direction::N }, r#"{"type":"move","dir":"N"}"#),
            (Action::Collect, r#"{"type":"collect"}"#),
            (Action::OpenVault, r#"{"type":"open_vault"}"#),
            (Action::Scan, r#"{"type":"scan"}"#),
            (Action::SetTrap { dir: Direction::W }, r#"{"type":"set_trap","dir":"W"}"#),
            (
                Action::Steal {
                    target_player_id: PlayerId::seat(2),
                },
                r#"{"type":"steal","target_player_id":"P2"}"#,
            ),
            (Action::say("truce?"), r#"{"type":"negotiate","message":"truce?"}"#),
            (Action::noop("trapped"), r#"{"type":"noop","reason":"trapped"}"#),
            (Action::idle(), r#"{"type":"noop"}"#),
        ];

        for (action, json) in cases {
            assert_eq!(serde_json::to_string(&action).unwrap(), json);
            assert_eq!(serde_json::from_str::<Action>(json).unwrap(), action);
        }
    }

    #[test]
    fn test_unit_variants_ignore_extra_fields() {
        let action: Action = serde_json::from_str(r#"{"type":"collect","why":"shiny"}"#).unwrap();
        assert_eq!(action, Action::Collect);
    }

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_tag(kind.as_str()), Some(kind));
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{kind}\""));
        }
        assert_eq!(ActionKind::from_tag("teleport"), None);
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Action::Move { dir: Direction::E }.kind(), ActionKind::Move);
        assert_eq!(Action::say("hi").kind(), ActionKind::Negotiate);
        assert_eq!(Action::idle().kind(), ActionKind::Noop);
    }

    #[test]
    fn test_noop_reason() {
        assert_eq!(Action::noop(reasons::TRAPPED).noop_reason(), Some("trapped"));
        assert_eq!(Action::idle().noop_reason(), None);
        assert_eq!(Action::Scan.noop_reason(), None);
    }
}

//! Round events.
//!
//! An `Event` records one notable outcome of round resolution. The kind
//! vocabulary is closed; the payload carries whichever fields the kind
//! needs and omits the rest on the wire.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::coord::Coord;
use super::player::PlayerId;

/// Fixed vocabulary of event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TrappedNoop,
    IllegalAction,
    CollisionBlocked,
    MoveBlocked,
    CollectTreasure,
    CollectKey,
    OpenVault,
    ScanUsed,
    TrapSet,
    StealKey,
    StealPoint,
    StealFail,
    NegotiateIgnored,
    TrapTriggered,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::TrappedNoop => "trapped_noop",
            EventKind::IllegalAction => "illegal_action",
            EventKind::CollisionBlocked => "collision_blocked",
            EventKind::MoveBlocked => "move_blocked",
            EventKind::CollectTreasure => "collect_treasure",
            EventKind::CollectKey => "collect_key",
            EventKind::OpenVault => "open_vault",
            EventKind::ScanUsed => "scan_used",
            EventKind::TrapSet => "trap_set",
            EventKind::StealKey => "steal_key",
            EventKind::StealPoint => "steal_point",
            EventKind::StealFail => "steal_fail",
            EventKind::NegotiateIgnored => "negotiate_ignored",
            EventKind::TrapTriggered => "trap_triggered",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured data attached to an event.
///
/// `player_id` is always the acting (or affected) player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub player_id: PlayerId,

    /// The other player in a steal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,

    /// Destination of a blocked move or a placed trap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Coord>,

    /// Points gained from a treasure or vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The attempted action echoed back by `illegal_action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

/// One outcome of round resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub round: u32,
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl Event {
    /// Create an event concerning `player`.
    #[must_use]
    pub fn new(round: u32, kind: EventKind, player: PlayerId) -> Self {
        Self {
            round,
            kind,
            payload: EventPayload {
                player_id: player,
                target: None,
                dest: None,
                value: None,
                reason: None,
                action: None,
            },
        }
    }

    /// Set the other player involved (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.payload.target = Some(target);
        self
    }

    /// Set the destination cell (builder pattern).
    #[must_use]
    pub fn with_dest(mut self, dest: Coord) -> Self {
        self.payload.dest = Some(dest);
        self
    }

    /// Set the point value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.payload.value = Some(value);
        self
    }

    /// Set the reason code (builder pattern).
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.payload.reason = Some(reason.into());
        self
    }

    /// Echo an action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.payload.action = Some(action);
        self
    }

    /// The player this event is about.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.payload.player_id
    }
}

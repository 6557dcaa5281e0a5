//! Legal-action enumeration and the legality predicate.
//!
//! Everything is evaluated against the player's current position and
//! tile. Movement legality only checks bounds; occupancy is settled during
//! resolution.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionKind, Coord, Direction, GameState, Player, PlayerId, TileType};

/// One entry of a legal-action listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The concrete action this entry stands for.
    pub action: Action,
}

impl ActionSummary {
    fn valid(action: Action, description: impl Into<String>) -> Self {
        Self {
            kind: action.kind(),
            description: description.into(),
            valid: true,
            reason: None,
            action,
        }
    }
}

/// Whether `player` may submit `action` in `state`.
///
/// Unknown players have no legal actions. Trapped players may only `Noop`.
#[must_use]
pub fn is_legal(state: &GameState, player: &PlayerId, action: &Action) -> bool {
    let Some(actor) = state.player(player) else {
        return false;
    };
    if actor.is_trapped() {
        return matches!(action, Action::Noop { .. });
    }

    match action {
        Action::Move { dir } => state.board.contains(actor.pos.step(*dir)),
        Action::Collect => current_tile(state, actor).is_collectible(),
        Action::OpenVault => current_tile(state, actor) == TileType::Vault && actor.keys > 0,
        Action::Scan => current_tile(state, actor) == TileType::Scanner,
        Action::SetTrap { dir } => trap_target_is_free(state, actor.pos.step(*dir)),
        Action::Steal { target_player_id } => state
            .player(target_player_id)
            .is_some_and(|target| actor.pos.is_adjacent(target.pos)),
        Action::Negotiate { .. } | Action::Noop { .. } => true,
    }
}

/// In bounds and currently empty.
pub(crate) fn trap_target_is_free(state: &GameState, cell: Coord) -> bool {
    state.board.get(cell) == Some(TileType::Empty)
}

fn current_tile(state: &GameState, player: &Player) -> TileType {
    state.board.tile(player.pos)
}

/// List every legal action for `player`, with a description of each.
///
/// Order: moves (N, E, S, W), collect, open vault, scan, traps (N, E, S,
/// W), steals by target id, negotiate, noop.
#[must_use]
pub fn legal_actions(state: &GameState, player: &PlayerId) -> Vec<ActionSummary> {
    let Some(actor) = state.player(player) else {
        return vec![ActionSummary {
            kind: ActionKind::Noop,
            description: "Invalid player ID".to_string(),
            valid: false,
            reason: Some("Player does not exist".to_string()),
            action: Action::idle(),
        }];
    };

    if actor.is_trapped() {
        return vec![ActionSummary::valid(Action::idle(), "Do nothing (trapped)")];
    }

    let mut actions = Vec::new();
    let neighbors = actor.pos.neighbors();

    for &(dir, dest) in &neighbors {
        if state.board.contains(dest) {
            actions.push(ActionSummary::valid(
                Action::Move { dir },
                format!("Move {dir} to {dest}"),
            ));
        }
    }

    let tile = current_tile(state, actor);
    if tile.is_collectible() {
        actions.push(ActionSummary::valid(
            Action::Collect,
            format!("Collect {}", tile.as_str().replace('_', " ")),
        ));
    }
    if tile == TileType::Vault && actor.keys > 0 {
        actions.push(ActionSummary::valid(
            Action::OpenVault,
            "Open vault (+8 points, consumes 1 key)",
        ));
    }
    if tile == TileType::Scanner {
        actions.push(ActionSummary::valid(Action::Scan, "Use scanner"));
    }

    for &(dir, cell) in &neighbors {
        if trap_target_is_free(state, cell) {
            actions.push(ActionSummary::valid(
                Action::SetTrap { dir },
                format!("Set trap {dir} at {cell}"),
            ));
        }
    }

    for other in state.players.values() {
        if other.player_id != actor.player_id && actor.pos.is_adjacent(other.pos) {
            actions.push(ActionSummary::valid(
                Action::Steal {
                    target_player_id: other.player_id.clone(),
                },
                format!("Steal from {}", other.player_id),
            ));
        }
    }

    actions.push(ActionSummary::valid(
        Action::say(String::new()),
        "Send negotiation message",
    ));
    actions.push(ActionSummary::valid(Action::idle(), "Do nothing"));

    actions
}

/// The concrete legal actions for `player`, without descriptions.
#[must_use]
pub fn legal_action_list(state: &GameState, player: &PlayerId) -> Vec<Action> {
    legal_actions(state, player)
        .into_iter()
        .filter(|summary| summary.valid)
        .map(|summary| summary.action)
        .collect()
}

/// Directions a player could move in, ignoring occupancy.
#[must_use]
pub fn move_directions(state: &GameState, player: &PlayerId) -> Vec<Direction> {
    legal_action_list(state, player)
        .into_iter()
        .filter_map(|action| match action {
            Action::Move { dir } => Some(dir),
            _ => None,
        })
        .collect()
}

//! Tool dispatch for agent-driven players.
//!
//! Agents call tools by name with JSON arguments. Read-only tools return a
//! view of the state; deal tools return a new state. Failures are
//! reported in the output as `{"error": "..."}` and leave the state as is.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::deals::{propose_deal, respond_to_deal};
use crate::core::{GameState, PlayerId};
use crate::rules::legal_actions;

/// Names of the tools agents may call.
pub const TOOL_NAMES: [&str; 6] = [
    "get_public_state",
    "get_player_state",
    "list_legal_actions",
    "propose_deal",
    "accept_deal",
    "reject_deal",
];

/// A tool invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Extract tool calls from an assistant response.
    ///
    /// Accepts both `{"function": {"name", "arguments"}}` and flat
    /// `{"name", "arguments"}` entries; string arguments are decoded as
    /// JSON and anything that is not an object becomes `{}`.
    #[must_use]
    pub fn parse_calls(response: &Value) -> Vec<ToolCall> {
        let Some(calls) = response.get("tool_calls").and_then(Value::as_array) else {
            return Vec::new();
        };

        calls
            .iter()
            .map(|call| {
                let function = call.get("function").unwrap_or(call);
                let name = function
                    .get("name")
                    .or_else(|| call.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let args = function
                    .get("arguments")
                    .or_else(|| call.get("arguments"))
                    .cloned()
                    .unwrap_or_else(empty_args);
                let args = match args {
                    Value::String(text) => {
                        serde_json::from_str(&text).unwrap_or_else(|_| json!({ "_raw": text }))
                    }
                    other => other,
                };
                let args = if args.is_object() { args } else { empty_args() };
                ToolCall::new(name, args)
            })
            .collect()
    }
}

/// Result of a tool call: the (possibly updated) state and the JSON reply.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolOutcome {
    pub state: GameState,
    pub output: Value,
}

impl ToolOutcome {
    fn unchanged(state: &GameState, output: Value) -> Self {
        Self {
            state: state.clone(),
            output,
        }
    }

    fn error(state: &GameState, message: impl std::fmt::Display) -> Self {
        Self::unchanged(state, json!({ "error": message.to_string() }))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.output.get("error").is_some()
    }
}

#[derive(Deserialize)]
struct PlayerArgs {
    player_id: Option<PlayerId>,
}

#[derive(Deserialize)]
struct ProposeArgs {
    to_player_id: Option<PlayerId>,
    terms: Option<String>,
}

#[derive(Deserialize)]
struct DealArgs {
    deal_id: Option<String>,
}

fn args<T: for<'de> Deserialize<'de>>(call: &ToolCall) -> Result<T, String> {
    T::deserialize(&call.args).map_err(|e| format!("invalid arguments for {}: {e}", call.name))
}

/// Run one tool call on behalf of `caller`.
#[must_use]
pub fn execute_tool(state: &GameState, caller: &PlayerId, call: &ToolCall) -> ToolOutcome {
    tracing::debug!(caller = %caller, tool = %call.name, "tool call");

    match call.name.as_str() {
        "get_public_state" => ToolOutcome::unchanged(state, public_state_view(state)),
        "get_player_state" | "list_legal_actions" => {
            let player = match args::<PlayerArgs>(call) {
                Ok(PlayerArgs {
                    player_id: Some(id),
                }) if state.player(&id).is_some() => id,
                Ok(_) => return ToolOutcome::error(state, "player_id not found"),
                Err(e) => return ToolOutcome::error(state, e),
            };
            let output = if call.name == "get_player_state" {
                player_state_view(state, &player)
            } else {
                json!({ "actions": legal_actions(state, &player) })
            };
            ToolOutcome::unchanged(state, output)
        }
        "propose_deal" => match args::<ProposeArgs>(call) {
            Ok(ProposeArgs {
                to_player_id: Some(to),
                terms: Some(terms),
            }) => match propose_deal(state, caller, &to, &terms) {
                Ok((next, deal)) => ToolOutcome {
                    state: next,
                    output: json!({ "deal_id": deal.deal_id, "status": deal.status }),
                },
                Err(e) => ToolOutcome::error(state, e),
            },
            Ok(_) => ToolOutcome::error(state, "to_player_id and terms required"),
            Err(e) => ToolOutcome::error(state, e),
        },
        "accept_deal" | "reject_deal" => match args::<DealArgs>(call) {
            Ok(DealArgs {
                deal_id: Some(deal_id),
            }) => {
                let accept = call.name == "accept_deal";
                match respond_to_deal(state, caller, &deal_id, accept) {
                    Ok((next, deal)) => ToolOutcome {
                        state: next,
                        output: json!({ "deal_id": deal.deal_id, "status": deal.status }),
                    },
                    Err(e) => ToolOutcome::error(state, e),
                }
            }
            Ok(_) => ToolOutcome::error(state, "deal_id required"),
            Err(e) => ToolOutcome::error(state, e),
        },
        other => {
            tracing::warn!(tool = %other, "unknown tool");
            ToolOutcome::error(state, format!("Unknown tool: {other}"))
        }
    }
}

/// Round, budget and every player's public standing.
#[must_use]
pub fn public_state_view(state: &GameState) -> Value {
    let players: serde_json::Map<String, Value> = state
        .players
        .values()
        .map(|p| {
            (
                p.player_id.to_string(),
                json!({
                    "pos": p.pos,
                    "score": p.score,
                    "keys": p.keys,
                    "trapped_for": p.trapped_for,
                }),
            )
        })
        .collect();

    json!({
        "round": state.round,
        "max_rounds": state.max_rounds,
        "players": players,
    })
}

/// One player's state, or an error object for unknown ids.
#[must_use]
pub fn player_state_view(state: &GameState, player: &PlayerId) -> Value {
    match state.player(player) {
        Some(p) => json!({
            "player_id": p.player_id,
            "pos": p.pos,
            "score": p.score,
            "keys": p.keys,
            "trapped_for": p.trapped_for,
        }),
        None => json!({ "error": "player_id not found" }),
    }
}

/// Function-calling schema for every tool, in `TOOL_NAMES` order.
#[must_use]
pub fn tool_definitions() -> Vec<Value> {
    let no_params = json!({"type": "object", "properties": {}, "required": []});
    let player_param = json!({
        "type": "object",
        "properties": {"player_id": {"type": "string"}},
        "required": ["player_id"],
    });
    let deal_param = json!({
        "type": "object",
        "properties": {"deal_id": {"type": "string"}},
        "required": ["deal_id"],
    });
    let propose_params = json!({
        "type": "object",
        "properties": {
            "to_player_id": {"type": "string"},
            "terms": {"type": "string"},
        },
        "required": ["to_player_id", "terms"],
    });

    let described = [
        ("Get public game state summary.", no_params),
        ("Get a specific player's private state.", player_param.clone()),
        ("List legal actions for a player.", player_param),
        ("Propose a deal to another player.", propose_params),
        ("Accept a deal by deal_id.", deal_param.clone()),
        ("Reject a deal by deal_id.", deal_param),
    ];

    TOOL_NAMES
        .iter()
        .zip(described)
        .map(|(name, (description, parameters))| {
            json!({
                "type": "function",
                "function": {
                    "name": name,
                    "description": description,
                    "parameters": parameters,
                },
            })
        })
        .collect()
}

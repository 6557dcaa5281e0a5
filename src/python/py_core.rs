//! JSON-in, JSON-out engine functions for Python.

use pyo3::prelude::*;

use crate::core::{GameState, PlayerId};
use crate::generation::BoardGenerator;
use crate::resolver::{self, CommittedActions};
use crate::rules;
use crate::tools::{self, ToolCall};

pub(crate) fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(value_error)
}

/// Parse and validate a state handed in from Python.
pub(crate) fn parse_state(state_json: &str) -> PyResult<GameState> {
    let state: GameState = serde_json::from_str(state_json).map_err(value_error)?;
    state.validate().map_err(value_error)?;
    Ok(state)
}

/// Generate an initial state.
#[pyfunction]
#[pyo3(signature = (seed, max_rounds = 15, board_size = 9))]
pub fn generate(seed: &str, max_rounds: u32, board_size: usize) -> PyResult<String> {
    let state = BoardGenerator::new(seed)
        .max_rounds(max_rounds)
        .board_size(board_size)
        .build()
        .map_err(value_error)?;
    to_json(&state)
}

/// List a player's legal actions.
#[pyfunction]
pub fn legal_actions(state_json: &str, player_id: &str) -> PyResult<String> {
    let state = parse_state(state_json)?;
    to_json(&rules::legal_actions(&state, &PlayerId::new(player_id)))
}

/// Resolve one round. `actions_json` maps player ids to action payloads.
#[pyfunction]
pub fn resolve(state_json: &str, actions_json: &str) -> PyResult<String> {
    let state = parse_state(state_json)?;
    let committed: CommittedActions = serde_json::from_str(actions_json).map_err(value_error)?;
    to_json(&resolver::resolve(&state, &committed))
}

/// Parse an assistant reply into an action, degrading to a reasoned noop.
#[pyfunction]
pub fn parse_action(text: &str) -> PyResult<String> {
    to_json(&resolver::parse_action_or_noop(text))
}

/// Run a tool call. Returns `{"state": ..., "output": ...}`.
#[pyfunction]
pub fn execute_tool(state_json: &str, player_id: &str, call_json: &str) -> PyResult<String> {
    let state = parse_state(state_json)?;
    let call: ToolCall = serde_json::from_str(call_json).map_err(value_error)?;
    let outcome = tools::execute_tool(&state, &PlayerId::new(player_id), &call);
    to_json(&serde_json::json!({
        "state": outcome.state,
        "output": outcome.output,
    }))
}

/// Function-calling schemas for every tool.
#[pyfunction]
pub fn tool_definitions() -> PyResult<String> {
    to_json(&tools::tool_definitions())
}

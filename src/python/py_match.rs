//! Match driver bindings for Python.

use pyo3::prelude::*;

use super::py_core::{parse_state, to_json, value_error};
use crate::arena::{self, ActionSource, Match, PolicyKind, RoundRecord};
use crate::core::PlayerId;
use crate::generation::BoardGenerator;
use crate::tools::ToolCall;

/// A match played by one of the built-in policies.
#[pyclass(name = "Match", unsendable)]
pub struct PyMatch {
    inner: Match<Box<dyn ActionSource>>,
}

#[pymethods]
impl PyMatch {
    /// Create a match. `policy` is `"greedy"` or `"random"`.
    #[new]
    #[pyo3(signature = (seed, max_rounds = 15, policy = "greedy", board_size = 9))]
    fn new(seed: &str, max_rounds: u32, policy: &str, board_size: usize) -> PyResult<Self> {
        let kind: PolicyKind =
            serde_json::from_value(serde_json::Value::String(policy.to_string()))
                .map_err(value_error)?;
        let state = BoardGenerator::new(seed)
            .max_rounds(max_rounds)
            .board_size(board_size)
            .build()
            .map_err(value_error)?;
        Ok(Self {
            inner: Match::new(state, kind.build(seed)),
        })
    }

    /// Play one round. Returns the round record as JSON, or `None` once
    /// the match is over.
    fn play_round(&mut self) -> PyResult<Option<String>> {
        self.inner.play_round().map(to_json).transpose()
    }

    /// Play to the end and return the result as JSON.
    fn run(&mut self) -> PyResult<String> {
        to_json(&self.inner.run())
    }

    /// Run a tool call for `player_id` and return its output as JSON.
    fn apply_tool(&mut self, player_id: &str, call_json: &str) -> PyResult<String> {
        let call: ToolCall = serde_json::from_str(call_json).map_err(value_error)?;
        to_json(&self.inner.apply_tool(&PlayerId::new(player_id), &call))
    }

    #[getter]
    fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    fn state_json(&self) -> PyResult<String> {
        to_json(self.inner.state())
    }

    fn records_json(&self) -> PyResult<String> {
        to_json(&self.inner.records())
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "Match(seed={:?}, round={}/{})",
            state.seed, state.round, state.max_rounds
        )
    }
}

/// Replay a round log against an initial state. Returns the final state.
#[pyfunction]
pub fn replay(initial_json: &str, records_json: &str) -> PyResult<String> {
    let initial = parse_state(initial_json)?;
    let records: Vec<RoundRecord> = serde_json::from_str(records_json).map_err(value_error)?;
    let state = arena::replay(&initial, &records).map_err(value_error)?;
    to_json(&state)
}

//! Python bindings for the grid-heist engine.
//!
//! States, actions and results cross the boundary as JSON strings in the
//! same wire format the engine serializes, so a Python orchestrator can
//! store and replay them unchanged.
//!
//! # Quick Start
//!
//! ```python
//! import json
//! import grid_heist as gh
//!
//! state = gh.generate("demo_seed", max_rounds=10)
//! legal = json.loads(gh.legal_actions(state, "P1"))
//!
//! result = json.loads(gh.resolve(state, json.dumps({"P1": {"type": "move", "dir": "E"}})))
//! state = json.dumps(result["next_state"])
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_match;

pub use py_core::*;
pub use py_match::*;

/// grid_heist: deterministic four-player grid game engine.
///
/// This module provides:
/// - Board generation, legal actions and round resolution
/// - Action text parsing and the deal tools
/// - A match driver with built-in demo policies and replay
#[pymodule]
fn grid_heist(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Engine
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(legal_actions, m)?)?;
    m.add_function(wrap_pyfunction!(resolve, m)?)?;
    m.add_function(wrap_pyfunction!(parse_action, m)?)?;

    // Tools
    m.add_function(wrap_pyfunction!(execute_tool, m)?)?;
    m.add_function(wrap_pyfunction!(tool_definitions, m)?)?;

    // Matches
    m.add_class::<PyMatch>()?;
    m.add_function(wrap_pyfunction!(replay, m)?)?;

    Ok(())
}

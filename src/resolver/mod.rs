//! Round resolution.
//!
//! `resolve` is the only way game progress advances: it consumes a state
//! and one committed action per player and returns the next state, the
//! events of the round and each player's reward delta.
//!
//! Committed actions arrive as `RawAction`s, either typed or raw JSON, and
//! are coerced here. Anything that cannot be used becomes a reasoned
//! `Noop`; bad input never makes `resolve` fail.

pub mod coerce;
pub mod round;

pub use coerce::{
    action_from_value, coerce_action, parse_action_or_noop, parse_action_response, RawAction,
};
pub use round::{resolve, CommittedActions, ResolutionResult};

//! The tool layer: deals and agent-facing state queries.
//!
//! This is the only code besides the resolver that produces new states,
//! and it only ever touches `active_deals`. The resolver never reads deals.

pub mod deals;
pub mod executor;

pub use deals::{deals_for, expire_deals, propose_deal, respond_to_deal};
pub use executor::{
    execute_tool, player_state_view, public_state_view, tool_definitions, ToolCall, ToolOutcome,
    TOOL_NAMES,
};

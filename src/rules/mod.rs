//! Game rules: which actions are legal, and who wins.
//!
//! The resolver consults `is_legal` to normalize committed actions;
//! action producers call `legal_actions` to know what they may submit.

pub mod engine;
pub mod legal;

pub use engine::{is_terminal, leaders, standings, GameResult};
pub use legal::{is_legal, legal_action_list, legal_actions, move_directions, ActionSummary};

//! Running whole matches.
//!
//! - `ActionSource`: where each round's actions come from
//! - `Match`: gathers actions, resolves rounds, keeps the round log
//! - `replay`: re-resolves a log and checks it still matches

pub mod policy;
pub mod runner;

pub use policy::{ActionSource, GreedyPolicy, PolicyKind, RandomPolicy, ScriptedPolicy};
pub use runner::{replay, Match, RoundRecord};

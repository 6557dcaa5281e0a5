//! Match driver and replay.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::policy::ActionSource;
use crate::core::{Event, GameState, PlayerId};
use crate::error::ReplayError;
use crate::resolver::{resolve, CommittedActions};
use crate::rules::{is_terminal, leaders, GameResult};
use crate::tools::{execute_tool, expire_deals, ToolCall};

/// Everything needed to re-run and check one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number before resolution.
    pub round: u32,
    pub committed: CommittedActions,
    pub events: Vec<Event>,
    pub rewards: BTreeMap<PlayerId, i64>,
}

/// A match in progress.
///
/// Owns the initial state, the current state and the round log. Tool
/// calls may replace the current state between rounds; they only touch
/// deals, which resolution never reads, so the log still replays.
pub struct Match<S: ActionSource> {
    initial: GameState,
    state: GameState,
    source: S,
    records: Vec<RoundRecord>,
    deal_ttl: Option<u32>,
}

impl<S: ActionSource> Match<S> {
    pub fn new(initial: GameState, source: S) -> Self {
        Self {
            state: initial.clone(),
            initial,
            source,
            records: Vec::new(),
            deal_ttl: None,
        }
    }

    /// Expire unanswered deals after `rounds` rounds (builder pattern).
    #[must_use]
    pub fn with_deal_ttl(mut self, rounds: u32) -> Self {
        self.deal_ttl = Some(rounds);
        self
    }

    pub fn initial(&self) -> &GameState {
        &self.initial
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn is_over(&self) -> bool {
        is_terminal(&self.state).is_some()
    }

    /// Gather one action per player, resolve and record the round.
    ///
    /// Returns `None` without doing anything once the round budget is
    /// spent.
    pub fn play_round(&mut self) -> Option<&RoundRecord> {
        if self.is_over() {
            return None;
        }

        let committed: CommittedActions = self
            .state
            .player_ids()
            .into_iter()
            .filter_map(|id| {
                let action = self.source.choose(&self.state, &id)?;
                Some((id, action))
            })
            .collect();

        let round = self.state.round;
        let result = resolve(&self.state, &committed);
        tracing::info!(
            round,
            events = result.events.len(),
            rewards = ?result.rewards,
            "round resolved"
        );

        self.state = result.next_state;
        if let Some(ttl) = self.deal_ttl {
            self.state = expire_deals(&self.state, ttl).0;
        }

        self.records.push(RoundRecord {
            round,
            committed,
            events: result.events,
            rewards: result.rewards,
        });
        self.records.last()
    }

    /// Play until the round budget is spent.
    pub fn run(&mut self) -> GameResult {
        while self.play_round().is_some() {}
        let result = leaders(&self.state);
        tracing::info!(result = ?result, rounds = self.state.round, "match finished");
        result
    }

    /// Execute a tool call for `caller` against the current state.
    pub fn apply_tool(&mut self, caller: &PlayerId, call: &ToolCall) -> serde_json::Value {
        let outcome = execute_tool(&self.state, caller, call);
        self.state = outcome.state;
        outcome.output
    }

    /// Consume the match, returning the initial state and the log.
    pub fn into_log(self) -> (GameState, Vec<RoundRecord>) {
        (self.initial, self.records)
    }
}

/// Re-resolve `records` from `initial`, checking every round's events and
/// rewards against the log. Returns the final state.
pub fn replay(initial: &GameState, records: &[RoundRecord]) -> Result<GameState, ReplayError> {
    let mut state = initial.clone();
    for record in records {
        if record.round != state.round {
            return Err(ReplayError::OutOfOrder {
                expected: state.round,
                found: record.round,
            });
        }
        let result = resolve(&state, &record.committed);
        if result.events != record.events || result.rewards != record.rewards {
            tracing::warn!(round = record.round, "replay diverged");
            return Err(ReplayError::Diverged {
                round: record.round,
            });
        }
        state = result.next_state;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::policy::{GreedyPolicy, RandomPolicy, ScriptedPolicy};
    use crate::core::{Action, EventKind};
    use crate::generation::generate;
    use serde_json::json;

    #[test]
    fn test_run_stops_at_budget() {
        let state = generate("arena", 6).unwrap();
        let mut game = Match::new(state, GreedyPolicy::new("arena"));
        game.run();

        assert_eq!(game.state().round, 6);
        assert_eq!(game.records().len(), 6);
        assert!(game.play_round().is_none());
        assert_eq!(game.records().len(), 6);
    }

    #[test]
    fn test_records_replay() {
        let state = generate("arena", 8).unwrap();
        let mut game = Match::new(state, RandomPolicy::new("arena"));
        game.run();
        let final_state = game.state().clone();

        let (initial, records) = game.into_log();
        assert_eq!(replay(&initial, &records).unwrap(), final_state);
    }

    #[test]
    fn test_replay_detects_tampering() {
        let state = generate("arena", 4).unwrap();
        let mut game = Match::new(state, GreedyPolicy::new("arena"));
        game.run();
        let (initial, mut records) = game.into_log();

        records[2].rewards.insert(PlayerId::seat(1), 99);
        assert_eq!(replay(&initial, &records), Err(ReplayError::Diverged { round: 2 }));

        records.remove(0);
        assert_eq!(
            replay(&initial, &records),
            Err(ReplayError::OutOfOrder {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_missing_submissions_recorded() {
        let state = generate("arena", 3).unwrap();
        let script = ScriptedPolicy::new().with_actions(PlayerId::seat(1), [Action::say("hi")]);
        let mut game = Match::new(state, script);

        let record = game.play_round().unwrap();
        assert_eq!(record.round, 0);
        assert_eq!(record.committed.len(), 1);
        assert_eq!(record.events.len(), 1);
        assert_eq!(record.events[0].kind, EventKind::NegotiateIgnored);
    }

    #[test]
    fn test_tools_between_rounds_keep_replay_valid() {
        let state = generate("arena", 5).unwrap();
        let mut game = Match::new(state, GreedyPolicy::new("arena")).with_deal_ttl(2);

        let output = game.apply_tool(
            &PlayerId::seat(1),
            &ToolCall::new("propose_deal", json!({"to_player_id": "P4", "terms": "split"})),
        );
        assert_eq!(output["deal_id"], "D1");

        game.play_round();
        game.play_round();
        assert_eq!(
            game.state().active_deals[0].status,
            crate::core::DealStatus::Expired
        );

        game.run();
        let (initial, records) = game.into_log();
        assert!(replay(&initial, &records).is_ok());
    }

    #[test]
    fn test_record_wire_round_trip() {
        let state = generate("arena", 2).unwrap();
        let mut game = Match::new(state, GreedyPolicy::new("arena"));
        game.run();
        let (initial, records) = game.into_log();

        let lines: Vec<String> = records
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect();
        let parsed: Vec<RoundRecord> = lines
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert!(replay(&initial, &parsed).is_ok());
    }
}

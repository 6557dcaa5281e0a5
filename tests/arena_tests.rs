//! Match driver tests.
//!
//! These tests play whole matches with the built-in and scripted
//! policies, then check the round log against a fresh replay.

use grid_heist::arena::{
    replay, ActionSource, GreedyPolicy, Match, PolicyKind, RandomPolicy, RoundRecord,
    ScriptedPolicy,
};
use grid_heist::core::{Action, DealStatus, Direction, EventKind, GameState, PlayerId};
use grid_heist::error::ReplayError;
use grid_heist::generation::generate;
use grid_heist::resolver::RawAction;
use grid_heist::rules::{leaders, GameResult};
use grid_heist::tools::ToolCall;
use serde_json::json;

fn p(n: usize) -> PlayerId {
    PlayerId::seat(n)
}

fn play(
    seed: &str,
    rounds: u32,
    source: impl ActionSource,
) -> (GameResult, GameState, Vec<RoundRecord>) {
    let mut game = Match::new(generate(seed, rounds).unwrap(), source);
    let result = game.run();
    let final_state = game.state().clone();
    let (_, records) = game.into_log();
    (result, final_state, records)
}

/// Test that the same seed and policy replay the same match.
#[test]
fn test_matches_are_deterministic() {
    for kind in [PolicyKind::Greedy, PolicyKind::Random] {
        let (result_a, state_a, records_a) = play("cup", 12, kind.build("cup"));
        let (result_b, state_b, records_b) = play("cup", 12, kind.build("cup"));
        assert_eq!(result_a, result_b);
        assert_eq!(state_a, state_b);
        assert_eq!(records_a, records_b);
    }
}

/// Test that the final state is reached again by replaying the log.
#[test]
fn test_log_replays_to_final_state() {
    let initial = generate("replay", 15).unwrap();
    let mut game = Match::new(initial.clone(), GreedyPolicy::new("replay"));
    game.run();

    assert_eq!(replay(&initial, game.records()).unwrap(), *game.state());
}

/// Test that a log survives a JSON lines round trip and still replays.
#[test]
fn test_log_json_lines_replay() {
    let initial = generate("jsonl", 10).unwrap();
    let mut game = Match::new(initial.clone(), RandomPolicy::new("jsonl"));
    game.run();

    let lines: Vec<String> = game
        .records()
        .iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect();
    let parsed: Vec<RoundRecord> = lines
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(parsed, game.records());
    assert_eq!(replay(&initial, &parsed).unwrap(), *game.state());
}

/// Test that replay reports the first round that no longer matches.
#[test]
fn test_replay_detects_edited_actions() {
    let initial = generate("edit", 5).unwrap();
    let mut game = Match::new(initial.clone(), GreedyPolicy::new("edit"));
    game.run();
    let mut records = game.records().to_vec();

    // Greedy only commits legal actions, so a steal from nobody is new.
    records[3].committed.insert(
        p(1),
        RawAction::from(json!({"type": "steal", "target_player_id": "P9"})),
    );
    assert_eq!(
        replay(&initial, &records),
        Err(ReplayError::Diverged { round: 3 })
    );
}

/// Test a scripted match that runs out of script.
#[test]
fn test_scripted_match() {
    let source = ScriptedPolicy::new()
        .with_actions(p(1), [Action::Move { dir: Direction::E }])
        .with_actions(p(2), [Action::Move { dir: Direction::W }]);
    let mut game = Match::new(generate("scripted", 3).unwrap(), source);

    let record = game.play_round().unwrap().clone();
    assert_eq!(record.round, 0);
    assert_eq!(record.committed.len(), 2);
    // Opposite top corners, so nothing blocks either step.
    assert!(record.events.iter().all(|e| e.kind != EventKind::CollisionBlocked));
    assert_eq!(game.state().player(&p(1)).unwrap().pos.x, 1);
    assert_eq!(game.state().player(&p(2)).unwrap().pos.x, 7);

    let record = game.play_round().unwrap().clone();
    assert!(record.committed.is_empty());
    assert_eq!(game.state().round, 2);
    assert_eq!(game.play_round().map(|r| r.round), Some(2));
    assert!(game.is_over());
    assert!(game.play_round().is_none());
}

/// Test that deals made through tools persist and expire between rounds.
#[test]
fn test_tools_between_rounds() {
    let mut game = Match::new(generate("deals", 6).unwrap(), GreedyPolicy::new("deals"))
        .with_deal_ttl(2);

    let reply = game.apply_tool(
        &p(1),
        &ToolCall::new("propose_deal", json!({"to_player_id": "P2", "terms": "share keys"})),
    );
    assert_eq!(reply["deal_id"], "D1");

    let reply = game.apply_tool(
        &p(3),
        &ToolCall::new("propose_deal", json!({"to_player_id": "P4", "terms": "truce"})),
    );
    assert_eq!(reply["deal_id"], "D2");
    let reply = game.apply_tool(&p(4), &ToolCall::new("accept_deal", json!({"deal_id": "D2"})));
    assert_eq!(reply["status"], "accepted");

    game.play_round();
    assert_eq!(game.state().active_deals[0].status, DealStatus::Proposed);
    game.play_round();
    assert_eq!(game.state().active_deals[0].status, DealStatus::Expired);
    assert_eq!(game.state().active_deals[1].status, DealStatus::Accepted);

    let initial = game.initial().clone();
    let records = game.records().to_vec();
    let replayed = replay(&initial, &records).unwrap();
    assert_eq!(replayed.players, game.state().players);
    assert_eq!(replayed.board, game.state().board);
}

/// Test that the winner reported by `run` matches the final standings.
#[test]
fn test_run_result_matches_leaders() {
    let (result, final_state, records) = play("leaders", 15, GreedyPolicy::new("leaders"));
    assert_eq!(records.len(), 15);
    assert_eq!(result, leaders(&final_state));
    assert!(final_state.players.values().all(|pl| pl.score >= 0));
}

/// Test that untyped payloads from an external source are accepted.
#[test]
fn test_raw_payload_source() {
    struct JsonSource;
    impl ActionSource for JsonSource {
        fn choose(&mut self, _state: &GameState, player: &PlayerId) -> Option<RawAction> {
            let payload = if player.as_str() == "P1" {
                json!({"type": "move", "dir": "S"})
            } else {
                json!({"type": "dance"})
            };
            Some(RawAction::from(payload))
        }
    }

    let mut game = Match::new(generate("raw", 2).unwrap(), JsonSource);
    game.play_round();
    let p1 = game.state().player(&p(1)).unwrap();
    assert_eq!(p1.pos.y, 1);
}

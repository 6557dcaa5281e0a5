//! Property tests for generation and round resolution.
//!
//! Invariants covered:
//! - Generation depends on the seed alone.
//! - Every resolved round advances the counter by exactly one.
//! - Scores never go negative and no two players share a cell.
//! - Listed legal actions always pass `is_legal`.
//! - `resolve` never mutates its input and is repeatable.
//! - Arbitrary JSON payloads never make `resolve` fail.

use proptest::prelude::*;
use serde_json::{json, Value};

use grid_heist::core::{Action, Direction, GameState, PlayerId, TileType};
use grid_heist::generation::{generate, SPECIAL_TILES};
use grid_heist::resolver::{resolve, CommittedActions, RawAction};
use grid_heist::rules::{is_legal, legal_action_list};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn seat() -> impl Strategy<Value = PlayerId> {
    (1usize..=5).prop_map(PlayerId::seat)
}

/// Any action, legal or not, including steals from a missing fifth seat.
fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        direction().prop_map(|dir| Action::Move { dir }),
        Just(Action::Collect),
        Just(Action::OpenVault),
        Just(Action::Scan),
        direction().prop_map(|dir| Action::SetTrap { dir }),
        seat().prop_map(|target_player_id| Action::Steal { target_player_id }),
        "[a-z ]{0,12}".prop_map(Action::say),
        Just(Action::idle()),
    ]
}

/// Typed actions mixed with junk payloads.
fn raw_action() -> impl Strategy<Value = RawAction> {
    prop_oneof![
        4 => action().prop_map(RawAction::from),
        1 => "[a-z_]{0,10}".prop_map(|tag| RawAction::from(json!({"type": tag}))),
        1 => any::<i64>().prop_map(|n| RawAction::from(Value::from(n))),
        1 => direction().prop_map(|dir| RawAction::from(json!({"type": "steal", "dir": dir}))),
    ]
}

fn committed() -> impl Strategy<Value = Vec<Option<RawAction>>> {
    prop::collection::vec(prop::option::weighted(0.9, raw_action()), 4)
}

fn to_committed(state: &GameState, actions: Vec<Option<RawAction>>) -> CommittedActions {
    state
        .player_ids()
        .into_iter()
        .zip(actions)
        .filter_map(|(id, action)| Some((id, action?)))
        .collect()
}

fn assert_state_sane(state: &GameState) {
    let mut cells: Vec<_> = state.players.values().map(|p| p.pos).collect();
    cells.sort_by_key(|c| (c.y, c.x));
    cells.dedup();
    assert_eq!(cells.len(), state.players.len(), "players overlap");
    assert!(state.players.values().all(|p| p.score >= 0));
    assert!(state.players.values().all(|p| state.board.contains(p.pos)));
    assert!(state.validate().is_ok());
}

proptest! {
    #[test]
    fn generation_is_seed_deterministic(seed in "[a-zA-Z0-9_]{1,16}", rounds in 1u32..50) {
        let a = generate(&seed, rounds).unwrap();
        let b = generate(&seed, rounds).unwrap();
        prop_assert_eq!(&a, &b);
        for (kind, count) in SPECIAL_TILES {
            prop_assert_eq!(a.board.count(kind), count);
        }
        prop_assert_eq!(a.board.count(TileType::Trap), 0);
    }

    #[test]
    fn rollout_respects_invariants(
        seed in "[a-z]{1,8}",
        rounds in prop::collection::vec(committed(), 1..20),
    ) {
        let mut state = generate(&seed, 30).unwrap();

        for actions in rounds {
            let committed = to_committed(&state, actions);
            let before = state.clone();

            let result = resolve(&state, &committed);
            prop_assert_eq!(&state, &before);
            prop_assert_eq!(result.next_state.round, state.round + 1);
            prop_assert_eq!(result.rewards.len(), state.players.len());
            prop_assert!(result.events.iter().all(|e| e.round == state.round));
            prop_assert_eq!(&resolve(&state, &committed), &result);

            assert_state_sane(&result.next_state);
            state = result.next_state;
        }
    }

    #[test]
    fn legal_listing_agrees_with_predicate(
        seed in "[a-z]{1,8}",
        rounds in prop::collection::vec(committed(), 0..12),
    ) {
        let mut state = generate(&seed, 30).unwrap();
        for actions in rounds {
            let committed = to_committed(&state, actions);
            state = resolve(&state, &committed).next_state;
        }

        for id in state.player_ids() {
            let listed = legal_action_list(&state, &id);
            prop_assert!(!listed.is_empty());
            for action in &listed {
                prop_assert!(is_legal(&state, &id, action), "{:?} for {}", action, id);
            }
        }
    }

    #[test]
    fn illegal_actions_change_nothing_but_events(seed in "[a-z]{1,8}", action in action()) {
        let state = generate(&seed, 10).unwrap();
        let id = PlayerId::seat(1);
        prop_assume!(!is_legal(&state, &id, &action));

        let committed: CommittedActions = [(id.clone(), RawAction::from(action.clone()))]
            .into_iter()
            .collect();
        let result = resolve(&state, &committed);

        prop_assert_eq!(&result.next_state.players, &state.players);
        prop_assert_eq!(&result.next_state.board, &state.board);
        prop_assert_eq!(result.events.len(), 1);
        prop_assert_eq!(result.events[0].payload.action.as_ref(), Some(&action));
    }
}

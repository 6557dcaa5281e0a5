//! Round resolution benchmarks.
//!
//! - `resolve` on a fresh board and on a mid-game board
//! - legal action listing
//! - a full greedy match

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use grid_heist::arena::{ActionSource, GreedyPolicy, Match, RandomPolicy};
use grid_heist::generation::generate;
use grid_heist::resolver::{resolve, CommittedActions};
use grid_heist::rules::legal_actions;
use grid_heist::{GameState, PlayerId};

fn committed_for(state: &GameState, policy: &mut impl ActionSource) -> CommittedActions {
    state
        .player_ids()
        .into_iter()
        .filter_map(|id| {
            let action = policy.choose(state, &id)?;
            Some((id, action))
        })
        .collect()
}

fn mid_game_state(seed: &str) -> GameState {
    let mut state = generate(seed, 30).expect("bench board generates");
    let mut policy = RandomPolicy::new(seed);
    for _ in 0..10 {
        let committed = committed_for(&state, &mut policy);
        state = resolve(&state, &committed).next_state;
    }
    state
}

fn bench_resolve(c: &mut Criterion) {
    let fresh = generate("bench", 15).expect("bench board generates");
    let fresh_actions = committed_for(&fresh, &mut GreedyPolicy::new("bench"));
    c.bench_function("resolve.fresh_board", |b| {
        b.iter(|| black_box(resolve(black_box(&fresh), black_box(&fresh_actions))));
    });

    let mid = mid_game_state("bench");
    let mid_actions = committed_for(&mid, &mut RandomPolicy::new("bench/mid"));
    c.bench_function("resolve.mid_game", |b| {
        b.iter(|| black_box(resolve(black_box(&mid), black_box(&mid_actions))));
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = mid_game_state("legal");
    let player = PlayerId::seat(1);
    c.bench_function("rules.legal_actions", |b| {
        b.iter(|| black_box(legal_actions(black_box(&state), &player)));
    });
}

fn bench_full_match(c: &mut Criterion) {
    c.bench_function("arena.greedy_match_15_rounds", |b| {
        b.iter_batched(
            || generate("match", 15).expect("bench board generates"),
            |state| {
                let mut game = Match::new(state, GreedyPolicy::new("match"));
                black_box(game.run())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_resolve, bench_legal_actions, bench_full_match);
criterion_main!(benches);

//! The per-round state transition.
//!
//! ## Pipeline
//!
//! 1. Trap enforcement and normalization of committed actions
//! 2. Simultaneous movement
//! 3. Every other action, ascending by player id
//! 4. Trap triggering at final positions
//! 5. Round advance
//!
//! Each stage observes the changes of the previous one, so the order is
//! fixed. All work happens on a private copy of the input state.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::coerce::RawAction;
use crate::core::{
    reasons, Action, Coord, Direction, Event, EventKind, GameState, Player, PlayerId, TileType,
    VAULT_VALUE,
};
use crate::rules::legal::{is_legal, trap_target_is_free};

/// One committed action per player. Absent players count as missing.
pub type CommittedActions = BTreeMap<PlayerId, RawAction>;

/// Output of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub next_state: GameState,
    /// Events in the order they were generated.
    pub events: Vec<Event>,
    /// Per-round deltas, with an entry for every player.
    pub rewards: BTreeMap<PlayerId, i64>,
}

impl ResolutionResult {
    /// Events of a single kind, in order.
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Reward delta for `player` this round.
    #[must_use]
    pub fn reward(&self, player: &PlayerId) -> i64 {
        self.rewards.get(player).copied().unwrap_or(0)
    }
}

/// Resolve one round.
///
/// Pure: the input state is never touched and identical inputs always
/// give identical results. Malformed or illegal actions degrade to `Noop`.
///
/// # Panics
///
/// Only on contract violations, such as a player standing off the board.
/// States from `generate` and `resolve` never trigger them; validate
/// external states with `GameState::validate` first.
#[must_use]
pub fn resolve(state: &GameState, committed: &CommittedActions) -> ResolutionResult {
    let _span = tracing::debug_span!("resolve", round = state.round).entered();

    for id in committed.keys() {
        if state.player(id).is_none() {
            tracing::warn!(player = %id, "ignoring committed action for unknown player");
        }
    }

    let mut round = RoundResolver::new(state);
    let actions = round.normalize(committed);
    round.resolve_movement(&actions);
    round.resolve_actions(&actions);
    round.trigger_traps();
    round.finish()
}

/// Working copy plus the outputs accumulated so far.
struct RoundResolver {
    round: u32,
    state: GameState,
    events: Vec<Event>,
    rewards: BTreeMap<PlayerId, i64>,
}

impl RoundResolver {
    fn new(state: &GameState) -> Self {
        Self {
            round: state.round,
            state: state.clone(),
            events: Vec::new(),
            rewards: state.players.keys().map(|id| (id.clone(), 0)).collect(),
        }
    }

    fn emit(&mut self, event: Event) {
        tracing::trace!(kind = %event.kind, player = %event.player(), "event");
        self.events.push(event);
    }

    fn event(&self, kind: EventKind, player: &PlayerId) -> Event {
        Event::new(self.round, kind, player.clone())
    }

    fn reward(&mut self, player: &PlayerId, delta: i64) {
        *self.rewards.entry(player.clone()).or_insert(0) += delta;
    }

    fn actor(&self, id: &PlayerId) -> &Player {
        self.state
            .player(id)
            .unwrap_or_else(|| panic!("player {id} missing from state"))
    }

    fn actor_mut(&mut self, id: &PlayerId) -> &mut Player {
        self.state
            .player_mut(id)
            .unwrap_or_else(|| panic!("player {id} missing from state"))
    }

    /// Step 1: one effective action per player.
    fn normalize(&mut self, committed: &CommittedActions) -> BTreeMap<PlayerId, Action> {
        let mut actions = BTreeMap::new();

        for id in self.state.player_ids() {
            let player = self.actor_mut(&id);
            if player.is_trapped() {
                player.trapped_for -= 1;
                tracing::debug!(player = %id, "trapped, committed action ignored");
                let event = self.event(EventKind::TrappedNoop, &id);
                self.emit(event);
                actions.insert(id, Action::noop(reasons::TRAPPED));
                continue;
            }

            let attempt = match committed.get(&id) {
                None => {
                    tracing::debug!(player = %id, "no committed action");
                    Action::noop(reasons::MISSING_ACTION)
                }
                Some(raw) => raw.coerce().unwrap_or_else(|err| {
                    tracing::debug!(
                        player = %id,
                        error = %err,
                        "committed action replaced by noop"
                    );
                    Action::noop(err.reason())
                }),
            };

            if is_legal(&self.state, &id, &attempt) {
                actions.insert(id, attempt);
            } else {
                tracing::debug!(player = %id, action = ?attempt, "illegal action replaced by noop");
                let event = self
                    .event(EventKind::IllegalAction, &id)
                    .with_reason(reasons::ILLEGAL_ACTION)
                    .with_action(attempt);
                self.emit(event);
                actions.insert(id, Action::noop(reasons::ILLEGAL_ACTION));
            }
        }

        actions
    }

    /// Step 2: shared destinations block everyone involved; pre-round
    /// positions block anyone entering them.
    fn resolve_movement(&mut self, actions: &BTreeMap<PlayerId, Action>) {
        let starting: FxHashSet<Coord> = self.state.players.values().map(|p| p.pos).collect();

        let intents: Vec<(PlayerId, Coord)> = actions
            .iter()
            .filter_map(|(id, action)| match action {
                Action::Move { dir } => Some((id.clone(), self.actor(id).pos.step(*dir))),
                _ => None,
            })
            .collect();

        let mut dest_counts: FxHashMap<Coord, usize> = FxHashMap::default();
        for (_, dest) in &intents {
            *dest_counts.entry(*dest).or_insert(0) += 1;
        }

        for (id, dest) in intents {
            if dest_counts.get(&dest).copied().unwrap_or(0) > 1 {
                let event = self.event(EventKind::CollisionBlocked, &id).with_dest(dest);
                self.emit(event);
            } else if starting.contains(&dest) {
                let event = self
                    .event(EventKind::MoveBlocked, &id)
                    .with_dest(dest)
                    .with_reason(reasons::OCCUPIED);
                self.emit(event);
            } else {
                self.actor_mut(&id).pos = dest;
            }
        }
    }

    /// Step 3. `actions` iterates ascending by id, and later players see
    /// the board and players as earlier ones left them.
    fn resolve_actions(&mut self, actions: &BTreeMap<PlayerId, Action>) {
        for (id, action) in actions {
            match action {
                Action::Collect => self.collect(id),
                Action::OpenVault => self.open_vault(id),
                Action::Scan => self.scan(id),
                Action::SetTrap { dir } => self.set_trap(id, *dir),
                Action::Steal { target_player_id } => self.steal(id, target_player_id),
                Action::Negotiate { .. } => {
                    let event = self.event(EventKind::NegotiateIgnored, id);
                    self.emit(event);
                }
                Action::Move { .. } | Action::Noop { .. } => {}
            }
        }
    }

    fn collect(&mut self, id: &PlayerId) {
        let pos = self.actor(id).pos;
        let tile = self.state.board.tile(pos);

        if let Some(value) = tile.treasure_value() {
            self.actor_mut(id).score += value;
            self.reward(id, value);
            self.state.board.clear(pos);
            let event = self.event(EventKind::CollectTreasure, id).with_value(value);
            self.emit(event);
        } else if tile == TileType::Key {
            self.actor_mut(id).keys += 1;
            self.state.board.clear(pos);
            let event = self.event(EventKind::CollectKey, id);
            self.emit(event);
        }
    }

    fn open_vault(&mut self, id: &PlayerId) {
        let actor = self.actor(id);
        let pos = actor.pos;
        if self.state.board.tile(pos) != TileType::Vault || actor.keys == 0 {
            return;
        }

        let actor = self.actor_mut(id);
        actor.keys -= 1;
        actor.score += VAULT_VALUE;
        self.reward(id, VAULT_VALUE);
        self.state.board.clear(pos);
        let event = self.event(EventKind::OpenVault, id).with_value(VAULT_VALUE);
        self.emit(event);
    }

    fn scan(&mut self, id: &PlayerId) {
        if self.state.board.tile(self.actor(id).pos) != TileType::Scanner {
            return;
        }
        self.reward(id, 1);
        let event = self.event(EventKind::ScanUsed, id);
        self.emit(event);
    }

    /// The target cell is re-checked: an earlier player may have changed it.
    fn set_trap(&mut self, id: &PlayerId, dir: Direction) {
        let cell = self.actor(id).pos.step(dir);
        if !trap_target_is_free(&self.state, cell) {
            return;
        }
        self.state.board.set(cell, TileType::Trap);
        let event = self.event(EventKind::TrapSet, id).with_dest(cell);
        self.emit(event);
    }

    /// A key if the target has one, else a point if it has any, else nothing.
    fn steal(&mut self, id: &PlayerId, target_id: &PlayerId) {
        let pos = self.actor(id).pos;
        let Some(target) = self.state.player(target_id) else {
            return;
        };
        if !pos.is_adjacent(target.pos) {
            tracing::debug!(player = %id, target = %target_id, "steal target moved out of reach");
            return;
        }

        let (target_keys, target_score) = (target.keys, target.score);

        let kind = if target_keys > 0 {
            self.actor_mut(target_id).keys -= 1;
            self.actor_mut(id).keys += 1;
            EventKind::StealKey
        } else if target_score > 0 {
            self.actor_mut(target_id).score -= 1;
            self.actor_mut(id).score += 1;
            self.reward(id, 1);
            self.reward(target_id, -1);
            EventKind::StealPoint
        } else {
            EventKind::StealFail
        };

        let event = self.event(kind, id).with_target(target_id.clone());
        self.emit(event);
    }

    /// Step 4. Positions no longer change, so every trap under a player fires.
    fn trigger_traps(&mut self) {
        for id in self.state.player_ids() {
            let pos = self.actor(&id).pos;
            if self.state.board.tile(pos) != TileType::Trap {
                continue;
            }
            let player = self.actor_mut(&id);
            player.trapped_for = player.trapped_for.max(1);
            self.state.board.clear(pos);
            let event = self.event(EventKind::TrapTriggered, &id);
            self.emit(event);
        }
    }

    /// Step 5.
    fn finish(mut self) -> ResolutionResult {
        self.state.round = self.round + 1;
        ResolutionResult {
            next_state: self.state,
            events: self.events,
            rewards: self.rewards,
        }
    }
}

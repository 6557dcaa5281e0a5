//! Action sources.
//!
//! A match asks its `ActionSource` for one action per player per round.
//! The sources here are simple demo players; an agent-backed source lives
//! outside the crate and plugs in through the same trait.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::resolver::RawAction;
use crate::rules::legal_action_list;

/// Something that commits actions for players.
pub trait ActionSource {
    /// The action `player` commits this round. `None` means nothing was
    /// submitted, which resolves as a missing action.
    fn choose(&mut self, state: &GameState, player: &PlayerId) -> Option<RawAction>;
}

impl<S: ActionSource + ?Sized> ActionSource for Box<S> {
    fn choose(&mut self, state: &GameState, player: &PlayerId) -> Option<RawAction> {
        (**self).choose(state, player)
    }
}

/// Which built-in policy to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Greedy,
    Random,
}

impl PolicyKind {
    /// Build the policy, seeded from the match seed.
    #[must_use]
    pub fn build(self, seed: &str) -> Box<dyn ActionSource> {
        match self {
            PolicyKind::Greedy => Box::new(GreedyPolicy::new(seed)),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

/// Picks uniformly among legal actions.
///
/// Draws from its own context stream of the match seed, so it never
/// shares a sequence with board generation.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    pub fn new(seed: &str) -> Self {
        Self {
            rng: GameRng::from_seed_str(seed).for_context("policy/random"),
        }
    }
}

impl ActionSource for RandomPolicy {
    fn choose(&mut self, state: &GameState, player: &PlayerId) -> Option<RawAction> {
        let legal = legal_action_list(state, player);
        let action = self.rng.choose(&legal).cloned().unwrap_or_else(Action::idle);
        Some(action.into())
    }
}

/// Takes the best immediate gain.
///
/// Priority: open a vault, collect, scan, steal, then a random move to a
/// cell nobody currently stands on, else noop.
#[derive(Clone, Debug)]
pub struct GreedyPolicy {
    rng: GameRng,
}

impl GreedyPolicy {
    pub fn new(seed: &str) -> Self {
        Self {
            rng: GameRng::from_seed_str(seed).for_context("policy/greedy"),
        }
    }

    fn pick(&mut self, state: &GameState, player: &PlayerId) -> Action {
        let legal = legal_action_list(state, player);
        let first = |wanted: fn(&Action) -> bool| legal.iter().find(|a| wanted(a)).cloned();

        if let Some(action) = first(|a| matches!(a, Action::OpenVault))
            .or_else(|| first(|a| matches!(a, Action::Collect)))
            .or_else(|| first(|a| matches!(a, Action::Scan)))
            .or_else(|| first(|a| matches!(a, Action::Steal { .. })))
        {
            return action;
        }

        let Some(pos) = state.player(player).map(|p| p.pos) else {
            return Action::idle();
        };
        let moves: Vec<Action> = legal
            .iter()
            .filter(|a| match a {
                Action::Move { dir } => state.player_at(pos.step(*dir)).is_none(),
                _ => false,
            })
            .cloned()
            .collect();

        self.rng.choose(&moves).cloned().unwrap_or_else(Action::idle)
    }
}

impl ActionSource for GreedyPolicy {
    fn choose(&mut self, state: &GameState, player: &PlayerId) -> Option<RawAction> {
        Some(self.pick(state, player).into())
    }
}

/// Replays fixed per-player queues. Players with an empty queue submit
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    queues: BTreeMap<PlayerId, VecDeque<RawAction>>,
}

impl ScriptedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue actions for `player` (builder pattern).
    #[must_use]
    pub fn with_actions<I, A>(mut self, player: PlayerId, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<RawAction>,
    {
        self.queues
            .entry(player)
            .or_default()
            .extend(actions.into_iter().map(Into::into));
        self
    }
}

impl ActionSource for ScriptedPolicy {
    fn choose(&mut self, _state: &GameState, player: &PlayerId) -> Option<RawAction> {
        self.queues.get_mut(player).and_then(VecDeque::pop_front)
    }
}

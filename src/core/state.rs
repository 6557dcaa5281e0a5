//! Complete game state.
//!
//! ## GameState
//!
//! - Round counter and round budget
//! - The seed the board was generated from
//! - Board tiles
//! - Players keyed by id
//! - Deals carried for visibility
//!
//! Uses `im` persistent data structures, so the per-round copy the
//! resolver takes is O(1) and shares everything it does not touch.

use im::{OrdMap, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::deal::Deal;
use super::player::{Player, PlayerId};
use crate::error::StateError;

/// Full, public game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Rounds resolved so far.
    pub round: u32,

    /// Round budget. Halting at the budget is the caller's job.
    pub max_rounds: u32,

    pub seed: String,

    pub board: Board,

    /// Players keyed by id. Iteration is ascending by id.
    pub players: OrdMap<PlayerId, Player>,

    #[serde(default)]
    pub active_deals: Vector<Deal>,
}

impl GameState {
    /// Assemble a state at round 0 from generated parts.
    #[must_use]
    pub fn new(
        seed: impl Into<String>,
        max_rounds: u32,
        board: Board,
        players: impl IntoIterator<Item = Player>,
    ) -> Self {
        Self {
            round: 0,
            max_rounds,
            seed: seed.into(),
            board,
            players: players
                .into_iter()
                .map(|p| (p.player_id.clone(), p))
                .collect(),
            active_deals: Vector::new(),
        }
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Look up a player for mutation.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// Player ids in ascending order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().cloned().collect()
    }

    /// The player standing on `coord`, if any.
    #[must_use]
    pub fn player_at(&self, coord: super::coord::Coord) -> Option<&Player> {
        self.players.values().find(|p| p.pos == coord)
    }

    /// Rounds left before the budget is exhausted.
    #[must_use]
    pub fn rounds_remaining(&self) -> u32 {
        self.max_rounds.saturating_sub(self.round)
    }

    /// Check a state received from outside the crate.
    ///
    /// States produced by generation and resolution always pass.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.max_rounds == 0 {
            return Err(StateError::ZeroMaxRounds);
        }
        if self.players.is_empty() {
            return Err(StateError::NoPlayers);
        }

        let mut occupied = FxHashSet::default();
        for (id, player) in &self.players {
            if id != &player.player_id {
                return Err(StateError::MismatchedId {
                    key: id.clone(),
                    embedded: player.player_id.clone(),
                });
            }
            if !self.board.contains(player.pos) {
                return Err(StateError::OutOfBounds {
                    player: id.clone(),
                    pos: player.pos,
                    size: self.board.size(),
                });
            }
            if !occupied.insert(player.pos) {
                return Err(StateError::SharedPosition {
                    player: id.clone(),
                    pos: player.pos,
                });
            }
            if player.score < 0 {
                return Err(StateError::NegativeScore {
                    player: id.clone(),
                    score: player.score,
                });
            }
        }
        Ok(())
    }
}

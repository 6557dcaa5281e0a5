//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! String identifier (`"P1"`..`"P4"` for a standard match). Ordering is
//! plain string ordering, which is the order every deterministic pass over
//! players uses.
//!
//! ## Player
//!
//! Position, score, held keys and remaining trapped rounds.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Number of seats in a standard match.
pub const PLAYER_COUNT: usize = 4;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an arbitrary identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of seat `n` (1-based): `P1`, `P2`, ...
    #[must_use]
    pub fn seat(n: usize) -> Self {
        Self(format!("P{n}"))
    }

    /// Iterate over the seat ids of a game with `player_count` players.
    ///
    /// ```
    /// use grid_heist::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0].as_str(), "P1");
    /// assert_eq!(players[3].as_str(), "P4");
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count).map(PlayerId::seat)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// State of a single player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub pos: Coord,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub keys: u32,
    /// Rounds remaining during which the player cannot act.
    #[serde(default)]
    pub trapped_for: u32,
}

impl Player {
    /// A fresh player with no score, keys or trap.
    #[must_use]
    pub fn new(player_id: PlayerId, pos: Coord) -> Self {
        Self {
            player_id,
            pos,
            score: 0,
            keys: 0,
            trapped_for: 0,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn with_keys(mut self, keys: u32) -> Self {
        self.keys = keys;
        self
    }

    #[must_use]
    pub fn with_trapped_for(mut self, rounds: u32) -> Self {
        self.trapped_for = rounds;
        self
    }

    #[must_use]
    pub fn is_trapped(&self) -> bool {
        self.trapped_for > 0
    }
}

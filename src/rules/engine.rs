//! Match outcome.
//!
//! The round budget is the only terminal condition. The winner is whoever
//! holds the highest score when it runs out.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Player, PlayerId};

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "players", rename_all = "snake_case")]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player shares the top score.
    Draw,
    /// Several, but not all, players share the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::Winners(ps) => ps.contains(player),
            GameResult::Draw => false,
        }
    }
}

/// Players ordered by score (highest first), ties broken by id.
#[must_use]
pub fn standings(state: &GameState) -> Vec<&Player> {
    let mut players: Vec<&Player> = state.players.values().collect();
    players.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.player_id.cmp(&b.player_id)));
    players
}

/// Decide the result from current scores, whether or not the match is over.
#[must_use]
pub fn leaders(state: &GameState) -> GameResult {
    let ranked = standings(state);
    let Some(top) = ranked.first().map(|p| p.score) else {
        return GameResult::Draw;
    };
    let mut best: Vec<PlayerId> = ranked
        .iter()
        .take_while(|p| p.score == top)
        .map(|p| p.player_id.clone())
        .collect();

    match best.len() {
        1 => GameResult::Winner(best.remove(0)),
        n if n == ranked.len() => GameResult::Draw,
        _ => GameResult::Winners(best),
    }
}

/// `Some(result)` once the round budget is spent, `None` while play continues.
#[must_use]
pub fn is_terminal(state: &GameState) -> Option<GameResult> {
    (state.round >= state.max_rounds).then(|| leaders(state))
}

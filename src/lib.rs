//! # grid-heist
//!
//! A deterministic round-resolution engine for Grid Heist, a four-player
//! simultaneous-move game on a 9x9 board of treasures, keys, vaults and
//! scanners.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `resolve` takes a state and one committed
//!    action per player and returns a brand new state. Inputs are never
//!    mutated, so any state can be kept, compared or replayed.
//!
//! 2. **Deterministic**: Board generation and the demo policies draw from
//!    a ChaCha RNG seeded only by the match seed. Resolution uses no
//!    randomness at all.
//!
//! 3. **Bad Input Is Data**: Malformed, unknown or illegal actions become
//!    reasoned `Noop`s and events, never errors.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Players and deals live in `im`
//!   collections, so the per-round state clone is cheap.
//!
//! - **Fixed Pipeline**: normalize, movement, collect, open vault, scan,
//!   set trap, steal, negotiate, trap triggers, round advance.
//!
//! ## Modules
//!
//! - `core`: Coordinates, board, players, actions, deals, events, state, RNG
//! - `generation`: Seeded initial-state generation
//! - `rules`: Legal actions and terminal detection
//! - `resolver`: Action coercion and round resolution
//! - `tools`: Deals and agent-facing state views
//! - `arena`: Match driver, demo policies and replay
//! - `config`: TOML configuration for the binary

pub mod arena;
pub mod config;
pub mod core;
pub mod error;
pub mod generation;
pub mod resolver;
pub mod rules;
pub mod tools;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    reasons, Action, ActionKind, Board, Coord, Deal, DealStatus, Direction, Event, EventKind,
    EventPayload, GameRng, GameState, Player, PlayerId, Tile, TileType, BOARD_SIZE,
    PLAYER_COUNT, VAULT_VALUE,
};

pub use crate::generation::{generate, BoardGenerator, DEFAULT_MAX_ROUNDS};

pub use crate::rules::{is_legal, is_terminal, legal_actions, ActionSummary, GameResult};

pub use crate::resolver::{
    parse_action_or_noop, parse_action_response, resolve, CommittedActions, RawAction,
    ResolutionResult,
};

pub use crate::tools::{execute_tool, ToolCall, ToolOutcome};

pub use crate::arena::{replay, ActionSource, Match, PolicyKind, RoundRecord};

pub use crate::config::ArenaConfig;

pub use crate::error::{
    ActionParseError, BoardError, ConfigError, DealError, GenerateError, ReplayError,
    StateError,
};

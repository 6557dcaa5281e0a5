//! Core value types: coordinates, board, players, actions, deals, events,
//! state and the seeded RNG.
//!
//! Everything here is plain data. Behaviour lives in `generation`, `rules`
//! and `resolver`.

pub mod action;
pub mod board;
pub mod coord;
pub mod deal;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{reasons, Action, ActionKind};
pub use board::{Board, Tile, TileType, VAULT_VALUE};
pub use coord::{Coord, Direction, BOARD_SIZE};
pub use deal::{Deal, DealStatus};
pub use event::{Event, EventKind, EventPayload};
pub use player::{Player, PlayerId, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::GameState;

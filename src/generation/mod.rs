//! Deterministic initial-state generation.
//!
//! A board is a fixed multiset of special tiles padded with empty tiles,
//! shuffled by a `GameRng` seeded only from the match seed and laid out
//! row-major. Players spawn in the four corners.

pub mod generator;

pub use generator::{
    generate, generate_with_size, spawn_positions, special_tile_count, BoardGenerator,
    DEFAULT_MAX_ROUNDS, SPECIAL_TILES,
};

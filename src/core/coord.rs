//! Board coordinates and compass directions.
//!
//! `Coord` uses signed components so that stepping off the edge of the
//! board yields a representable (but out-of-bounds) value; callers check
//! bounds against `Board::contains`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default board edge length.
pub const BOARD_SIZE: usize = 9;

/// A cell position, `x` to the east and `y` to the south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir`, which may lie off the board.
    #[must_use]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal adjacency (distance exactly 1).
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// All four orthogonal neighbours paired with their direction, in
    /// N, E, S, W order. Some may be off the board.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[(Direction, Coord); 4]> {
        Direction::ALL.iter().map(|&dir| (dir, self.step(dir))).collect()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction for movement and trap placement.
///
/// Serializes as the single letters `"N"`, `"E"`, `"S"`, `"W"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// `(dx, dy)` for one step; north is `-y`.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::E => (1, 0),
            Direction::S => (0, 1),
            Direction::W => (-1, 0),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::E => "E",
            Direction::S => "S",
            Direction::W => "W",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

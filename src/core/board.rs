//! Tiles and the square board grid.
//!
//! ## Board
//!
//! Row-major storage in an `im::Vector`, so cloning a board for the next
//! round shares every untouched chunk with the previous one.
//!
//! On the wire a board is `board[y][x] = {"type": "<tile>"}`.

use im::Vector;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::coord::Coord;
use crate::error::BoardError;

/// Score awarded for opening a vault.
pub const VAULT_VALUE: i64 = 8;

/// The closed set of tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Empty,
    #[serde(rename = "treasure_1")]
    Treasure1,
    #[serde(rename = "treasure_2")]
    Treasure2,
    #[serde(rename = "treasure_3")]
    Treasure3,
    Key,
    Vault,
    Scanner,
    Trap,
}

impl TileType {
    /// Score value of a treasure tile, `None` for everything else.
    #[must_use]
    pub const fn treasure_value(self) -> Option<i64> {
        match self {
            TileType::Treasure1 => Some(1),
            TileType::Treasure2 => Some(2),
            TileType::Treasure3 => Some(3),
            _ => None,
        }
    }

    /// Treasures and keys can be picked up with `Collect`.
    #[must_use]
    pub const fn is_collectible(self) -> bool {
        self.treasure_value().is_some() || matches!(self, TileType::Key)
    }

    /// Wire name of this tile kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Treasure1 => "treasure_1",
            TileType::Treasure2 => "treasure_2",
            TileType::Treasure3 => "treasure_3",
            TileType::Key => "key",
            TileType::Vault => "vault",
            TileType::Scanner => "scanner",
            TileType::Trap => "trap",
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One board cell as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind: TileType,
}

impl Tile {
    #[must_use]
    pub const fn new(kind: TileType) -> Self {
        Self { kind }
    }
}

/// Square grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vector<TileType>,
}

impl Board {
    /// An all-empty board of the given edge length.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            tiles: std::iter::repeat(TileType::Empty).take(size * size).collect(),
        }
    }

    /// Lay out `tiles` row-major into a `size`×`size` grid.
    ///
    /// Returns `None` unless exactly `size * size` tiles are supplied.
    #[must_use]
    pub fn from_row_major(size: usize, tiles: Vec<TileType>) -> Option<Self> {
        (size > 0 && tiles.len() == size * size).then(|| Self {
            size,
            tiles: Vector::from(tiles),
        })
    }

    /// Build a board from `rows[y][x]`.
    pub fn from_rows(rows: Vec<Vec<TileType>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(BoardError::NotSquare {
                row,
                len: cells.len(),
                size,
            });
        }
        let tiles = rows.into_iter().flatten().collect();
        Ok(Self { size, tiles })
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.size && y < self.size).then_some(y * self.size + x)
    }

    /// The tile at `coord`, or `None` off the board.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<TileType> {
        self.index(coord).map(|i| self.tiles[i])
    }

    /// The tile at `coord`.
    ///
    /// # Panics
    ///
    /// If `coord` is off the board. Callers establish bounds first.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> TileType {
        self.get(coord)
            .unwrap_or_else(|| panic!("{coord} is outside the {0}x{0} board", self.size))
    }

    /// Overwrite the tile at `coord`.
    ///
    /// # Panics
    ///
    /// If `coord` is off the board.
    pub fn set(&mut self, coord: Coord, kind: TileType) {
        let index = self
            .index(coord)
            .unwrap_or_else(|| panic!("{coord} is outside the {0}x{0} board", self.size));
        self.tiles.set(index, kind);
    }

    /// Reset the tile at `coord` to empty.
    pub fn clear(&mut self, coord: Coord) {
        self.set(coord, TileType::Empty);
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<TileType>> + '_ {
        (0..self.size).map(move |y| {
            self.tiles
                .iter()
                .skip(y * self.size)
                .take(self.size)
                .copied()
                .collect()
        })
    }

    /// Number of tiles of the given kind.
    #[must_use]
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<Tile>> = self
            .rows()
            .map(|row| row.into_iter().map(Tile::new).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<Tile>>::deserialize(deserializer)?;
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|tile| tile.kind).collect())
            .collect();
        Board::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Board {
    /// One character per tile, one line per row.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row
                .into_iter()
                .map(|t| match t {
                    TileType::Empty => '.',
                    TileType::Treasure1 => '1',
                    TileType::Treasure2 => '2',
                    TileType::Treasure3 => '3',
                    TileType::Key => 'k',
                    TileType::Vault => 'V',
                    TileType::Scanner => 's',
                    TileType::Trap => 'x',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_values() {
        assert_eq!(TileType::Treasure1.treasure_value(), Some(1));
        assert_eq!(TileType::Treasure3.treasure_value(), Some(3));
        assert_eq!(TileType::Key.treasure_value(), None);
        assert!(TileType::Key.is_collectible());
        assert!(TileType::Treasure2.is_collectible());
        assert!(!TileType::Vault.is_collectible());
        assert!(!TileType::Trap.is_collectible());
    }

    #[test]
    fn test_tile_type_wire_names() {
        for kind in [
            TileType::Empty,
            TileType::Treasure1,
            TileType::Treasure2,
            TileType::Treasure3,
            TileType::Key,
            TileType::Vault,
            TileType::Scanner,
            TileType::Trap,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_get_and_set() {
        let mut board = Board::empty(9);
        let c = Coord::new(3, 7);

        assert_eq!(board.get(c), Some(TileType::Empty));
        board.set(c, TileType::Vault);
        assert_eq!(board.tile(c), TileType::Vault);
        board.clear(c);
        assert_eq!(board.tile(c), TileType::Empty);

        assert_eq!(board.get(Coord::new(9, 0)), None);
        assert_eq!(board.get(Coord::new(0, -1)), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Board::empty(9);
        let mut copy = original.clone();
        copy.set(Coord::new(0, 0), TileType::Trap);

        assert_eq!(original.tile(Coord::new(0, 0)), TileType::Empty);
        assert_eq!(copy.tile(Coord::new(0, 0)), TileType::Trap);
    }

    #[test]
    #[should_panic(expected = "outside the 9x9 board")]
    fn test_tile_out_of_bounds_panics() {
        let _ = Board::empty(9).tile(Coord::new(9, 9));
    }

    #[test]
    fn test_wire_layout_is_row_major() {
        let mut board = Board::empty(3);
        board.set(Coord::new(2, 0), TileType::Key);
        board.set(Coord::new(0, 1), TileType::Scanner);

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json[0][2]["type"], "key");
        assert_eq!(json[1][0]["type"], "scanner");
        assert_eq!(json[2][2]["type"], "empty");

        let back: Board = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_rejects_non_square() {
        let err = Board::from_rows(vec![vec![TileType::Empty; 2], vec![TileType::Empty; 3]]);
        assert!(matches!(err, Err(BoardError::NotSquare { row: 1, len: 3, size: 2 })));
        assert!(matches!(Board::from_rows(vec![]), Err(BoardError::Empty)));

        let json = r#"[[{"type":"empty"}],[{"type":"empty"}]]"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_display() {
        let mut board = Board::empty(2);
        board.set(Coord::new(1, 1), TileType::Vault);
        assert_eq!(board.to_string(), "..\n.V\n");
    }
}

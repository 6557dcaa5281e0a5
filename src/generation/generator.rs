//! Seeded board and spawn construction.

use crate::core::{
    Board, Coord, GameRng, GameState, Player, PlayerId, TileType, BOARD_SIZE, PLAYER_COUNT,
};
use crate::error::GenerateError;

/// Round budget used when none is given.
pub const DEFAULT_MAX_ROUNDS: u32 = 15;

/// Special tiles placed on every board, before padding with empty tiles.
pub const SPECIAL_TILES: [(TileType, usize); 6] = [
    (TileType::Treasure1, 8),
    (TileType::Treasure2, 6),
    (TileType::Treasure3, 4),
    (TileType::Key, 6),
    (TileType::Vault, 4),
    (TileType::Scanner, 4),
];

/// Total number of special tiles.
#[must_use]
pub fn special_tile_count() -> usize {
    SPECIAL_TILES.iter().map(|(_, n)| n).sum()
}

/// Builder for an initial game state.
///
/// ```
/// use grid_heist::generation::BoardGenerator;
///
/// let state = BoardGenerator::new("demo_seed").max_rounds(10).build().unwrap();
/// assert_eq!(state.round, 0);
/// assert_eq!(state.players.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    seed: String,
    max_rounds: u32,
    board_size: usize,
}

impl BoardGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            board_size: BOARD_SIZE,
        }
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Check the arguments without generating anything.
    pub fn check(&self) -> Result<(), GenerateError> {
        let size = self.board_size;
        if size < 2 {
            return Err(GenerateError::TooSmallForSpawns { size });
        }
        let needed = special_tile_count();
        if size * size < needed {
            return Err(GenerateError::TooSmallForTiles {
                size,
                cells: size * size,
                needed,
            });
        }
        if self.max_rounds == 0 {
            return Err(GenerateError::ZeroMaxRounds);
        }
        Ok(())
    }

    /// Generate the board and spawns.
    ///
    /// The RNG is created here from the seed and dropped on return, so no
    /// other code can observe or disturb the sequence.
    pub fn build(self) -> Result<GameState, GenerateError> {
        self.check()?;

        let mut rng = GameRng::from_seed_str(&self.seed);
        let board = layout_board(self.board_size, &mut rng);
        let players = spawn_players(self.board_size);

        tracing::debug!(
            seed = %self.seed,
            size = self.board_size,
            max_rounds = self.max_rounds,
            "generated board"
        );

        Ok(GameState::new(self.seed, self.max_rounds, board, players))
    }
}

/// Generate a standard 9x9 initial state.
pub fn generate(seed: &str, max_rounds: u32) -> Result<GameState, GenerateError> {
    BoardGenerator::new(seed).max_rounds(max_rounds).build()
}

/// Generate an initial state on a board of the given edge length.
pub fn generate_with_size(
    seed: &str,
    max_rounds: u32,
    board_size: usize,
) -> Result<GameState, GenerateError> {
    BoardGenerator::new(seed)
        .max_rounds(max_rounds)
        .board_size(board_size)
        .build()
}

fn layout_board(size: usize, rng: &mut GameRng) -> Board {
    let mut tiles: Vec<TileType> = SPECIAL_TILES
        .iter()
        .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count))
        .collect();
    tiles.resize(size * size, TileType::Empty);
    rng.shuffle(&mut tiles);

    Board::from_row_major(size, tiles)
        .unwrap_or_else(|| unreachable!("tile list was resized to {size}x{size}"))
}

/// Corner spawns: P1 top-left, P2 top-right, P3 bottom-left, P4 bottom-right.
pub fn spawn_positions(size: usize) -> [Coord; PLAYER_COUNT] {
    let far = i32::try_from(size - 1).unwrap_or(i32::MAX);
    [
        Coord::new(0, 0),
        Coord::new(far, 0),
        Coord::new(0, far),
        Coord::new(far, far),
    ]
}

fn spawn_players(size: usize) -> Vec<Player> {
    PlayerId::all(PLAYER_COUNT)
        .zip(spawn_positions(size))
        .map(|(id, pos)| Player::new(id, pos))
        .collect()
}

use std::path::PathBuf;

use crate::core::{Coord, DealStatus, PlayerId};

/// Errors from board generation arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("board size {size} cannot hold four distinct corner spawns")]
    TooSmallForSpawns { size: usize },

    #[error("board size {size} has {cells} cells but {needed} special tiles must fit")]
    TooSmallForTiles {
        size: usize,
        cells: usize,
        needed: usize,
    },

    #[error("max_rounds must be > 0")]
    ZeroMaxRounds,
}

/// Errors from building a board out of rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,

    #[error("row {row} has {len} tiles, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
}

/// Errors from validating an externally supplied game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("max_rounds must be > 0")]
    ZeroMaxRounds,

    #[error("state has no players")]
    NoPlayers,

    #[error("player map key {key} holds player {embedded}")]
    MismatchedId { key: PlayerId, embedded: PlayerId },

    #[error("player {player} at {pos} is outside the {size}x{size} board")]
    OutOfBounds {
        player: PlayerId,
        pos: Coord,
        size: usize,
    },

    #[error("player {player} shares {pos} with another player")]
    SharedPosition { player: PlayerId, pos: Coord },

    #[error("player {player} has negative score {score}")]
    NegativeScore { player: PlayerId, score: i64 },
}

/// Errors from turning submitted text or JSON into an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("empty response")]
    EmptyResponse,

    #[error("response holds no JSON object: {0}")]
    InvalidJson(String),

    #[error("unknown action type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownActionType(Option<String>),

    #[error("invalid action schema: {0}")]
    InvalidSchema(String),
}

impl ActionParseError {
    /// The `Noop` reason code this failure degrades to.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        use crate::core::reasons;
        match self {
            ActionParseError::EmptyResponse => reasons::EMPTY_RESPONSE,
            ActionParseError::InvalidJson(_) => reasons::INVALID_JSON,
            ActionParseError::UnknownActionType(_) => reasons::UNKNOWN_ACTION_TYPE,
            ActionParseError::InvalidSchema(_) => reasons::INVALID_ACTION_SCHEMA,
        }
    }
}

/// Errors from the deal tools.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealError {
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} cannot propose a deal to themselves")]
    SelfDeal(PlayerId),

    #[error("deal terms must not be blank")]
    BlankTerms,

    #[error("deal not found: {0}")]
    UnknownDeal(String),

    #[error("deal {deal_id} is addressed to {recipient}, not {responder}")]
    NotRecipient {
        deal_id: String,
        recipient: PlayerId,
        responder: PlayerId,
    },

    #[error("deal {deal_id} is already {status}")]
    NotOpen { deal_id: String, status: DealStatus },
}

/// Errors from replaying a recorded match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("replay diverged at round {round}")]
    Diverged { round: u32 },

    #[error("record for round {found} found where round {expected} was expected")]
    OutOfOrder { expected: u32, found: u32 },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

use std::path::Path;

use crate::arena::PolicyKind;
use crate::core::BOARD_SIZE;
use crate::error::ConfigError;
use crate::generation::{BoardGenerator, DEFAULT_MAX_ROUNDS};

/// Match parameters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub seed: String,
    pub max_rounds: u32,
    pub board_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            seed: "demo_1".to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            board_size: BOARD_SIZE,
        }
    }
}

impl MatchConfig {
    /// A generator for these parameters.
    pub fn generator(&self) -> BoardGenerator {
        BoardGenerator::new(self.seed.clone())
            .max_rounds(self.max_rounds)
            .board_size(self.board_size)
    }
}

/// Demo policy selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
        }
    }
}

/// Top-level arena configuration, loadable from TOML.
///
/// ```toml
/// [match]
/// seed = "demo_1"
/// max_rounds = 15
/// board_size = 9
///
/// [policy]
/// kind = "greedy"
///
/// [logging]
/// filter = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(rename = "match")]
    pub game: MatchConfig,
    pub policy: PolicyConfig,
    pub logging: LoggingConfig,
}

impl ArenaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ArenaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.seed.is_empty() {
            return Err(ConfigError::Validation("match.seed must not be empty".into()));
        }
        if self.game.max_rounds == 0 {
            return Err(ConfigError::Validation(
                "match.max_rounds must be > 0".into(),
            ));
        }
        self.game
            .generator()
            .check()
            .map_err(|e| ConfigError::Validation(format!("match.board_size: {e}")))?;
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        Ok(())
    }
}

//! Game configuration.
//!
//! A `GameConfig` fixes everything about a game that isn't decided by the
//! cards: seat names, the hand-size cycle, how many base sets make up the
//! deck, and optionally the seed of the shuffle provider.
//!
//! Configs can be built in code or loaded from TOML:
//!
//! ```
//! use rust_dog::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("seed = 7\nround_sizes = [3, 2]").unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.round_sizes, vec![3, 2]);
//! assert_eq!(config.deck_copies, 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ConfigError;
use super::player::PLAYER_COUNT;
use crate::cards::deck::{BASE_SET_SIZE, DEFAULT_ROUND_SIZES};

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display name per seat.
    pub player_names: [String; PLAYER_COUNT],

    /// Hand size per round, cycled.
    pub round_sizes: Vec<usize>,

    /// Number of 55-card base sets shuffled together.
    pub deck_copies: usize,

    /// Seed for the shuffle provider. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: std::array::from_fn(|i| format!("Player{}", i + 1)),
            round_sizes: DEFAULT_ROUND_SIZES.to_vec(),
            deck_copies: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hand-size cycle.
    #[must_use]
    pub fn with_round_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.round_sizes = sizes.into();
        self
    }

    /// Set the number of base sets in the deck.
    #[must_use]
    pub fn with_deck_copies(mut self, copies: usize) -> Self {
        self.deck_copies = copies;
        self
    }

    /// Set the seat names.
    #[must_use]
    pub fn with_player_names(mut self, names: [String; PLAYER_COUNT]) -> Self {
        self.player_names = names;
        self
    }

    /// Total cards in play.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        BASE_SET_SIZE * self.deck_copies
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_copies == 0 {
            return Err(ConfigError::Validation("deck_copies must be >= 1".into()));
        }
        if self.round_sizes.is_empty() {
            return Err(ConfigError::Validation("round_sizes must not be empty".into()));
        }
        if self.round_sizes.contains(&0) {
            return Err(ConfigError::Validation("round_sizes entries must be >= 1".into()));
        }
        let largest = self.round_sizes.iter().copied().max().unwrap_or(0);
        if largest * PLAYER_COUNT > self.deck_size() {
            return Err(ConfigError::Validation(format!(
                "a round of {largest} cards per seat needs {} cards, deck has {}",
                largest * PLAYER_COUNT,
                self.deck_size()
            )));
        }
        Ok(())
    }
}

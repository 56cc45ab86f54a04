//! Error types.
//!
//! `ActionError` explains why the engine refused an action. The engine's
//! `apply_action` boundary never surfaces it: a refused action is a no-op
//! and the reason only goes to the log. `try_apply_action` returns it.

use std::path::PathBuf;

use crate::board::Position;
use crate::cards::Card;

/// Reasons an action is refused. The state is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is finished")]
    GameFinished,

    #[error("{card} is not in the active player's hand")]
    NotInHand { card: Card },

    #[error("{card} cannot be played in the current phase")]
    PhaseMismatch { card: Card },

    #[error("a card for the exchange was already chosen")]
    ExchangeSlotFilled,

    #[error("no active marble at {pos}")]
    NoMarbleAt { pos: Position },

    #[error("no marble can enter play from the kennel")]
    EntryBlocked,

    #[error("{card} cannot move a marble from {from} to {to}")]
    Unreachable { card: Card, from: Position, to: Position },

    #[error("a safe marble blocks square {pos}")]
    BlockedBySafe { pos: Position },

    #[error("square {pos} is in a home stretch and occupied")]
    HomeOccupied { pos: Position },

    #[error("square {pos} holds one of the mover's own marbles")]
    OwnMarble { pos: Position },

    #[error("marble at {pos} cannot be swapped")]
    NotSwappable { pos: Position },

    #[error("split move of {steps} exceeds the remaining {remaining} steps")]
    NoStepBudget { steps: i32, remaining: i32 },

    #[error("{card} is not an allowed stand-in")]
    InvalidSubstitute { card: Card },

    #[error("a move needs a source and a destination")]
    MissingPositions,

    #[error("an action is required in the current phase")]
    ActionRequired,
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

/// Errors from encoding or decoding a state snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}

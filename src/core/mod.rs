//! Core engine types: seats, state, actions, RNG, configuration, errors.
//!
//! These are the values exchanged across the engine boundary. They carry
//! no rules; `games::dog` interprets them.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, Team, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use error::{ActionError, ConfigError, SnapshotError};
pub use action::{Action, ActionRecord};
pub use state::{GameState, GamePhase, Marble, PlayerState};

//! # rust-dog
//!
//! Rules engine for Dog, a four-player partnered marble race played with
//! cards.
//!
//! ## Design Principles
//!
//! 1. **Value-Semantics State**: `GameState` is a plain value. Snapshots,
//!    per-seat views and the split-move rollback are all copies of it.
//!
//! 2. **Generate, Then Apply**: Every legal action is enumerated up front.
//!    Applying an action re-validates it with the same checks, and a
//!    refused action leaves the state untouched.
//!
//! 3. **Injected Randomness**: Shuffles and seating come from a `GameRng`,
//!    so a seed reproduces a whole game.
//!
//! ## Architecture
//!
//! - **Derived Turn Phase**: exchange, normal play, wild card and split
//!   move phases are read off the state rather than stored separately.
//!
//! - **Persistent Data Structures**: Draw and discard piles use `im-rs`
//!   vectors, keeping state copies cheap.
//!
//! ## Modules
//!
//! - `core`: Players, teams, state, actions, RNG, configuration, errors
//! - `board`: Track, kennel and home-stretch geometry
//! - `cards`: Card values, deck composition and dealing
//! - `rules`: `RulesEngine` trait at the transport boundary
//! - `games`: The Dog engine
//! - `strategy`: Automatic players and a game driver

pub mod core;
pub mod board;
pub mod cards;
pub mod rules;
pub mod games;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, Team,
    GameRng, GameRngState, GameConfig,
    Action, ActionRecord,
    GameState, GamePhase, Marble, PlayerState,
    ActionError, ConfigError, SnapshotError,
};

pub use crate::board::Position;

pub use crate::cards::{Card, Rank, Suit};

pub use crate::rules::{RulesEngine, GameResult};

pub use crate::games::dog::{Dog, TurnPhase};

pub use crate::strategy::{
    Strategy, RandomStrategy, FirstActionStrategy,
    play_game, GameOutcome,
};

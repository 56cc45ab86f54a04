//! Rules engine trait for game implementations.
//!
//! `RulesEngine` is the whole surface a transport or a strategy needs:
//! - Load/store the state, or a masked per-seat view
//! - List legal actions
//! - Apply one action (or none)
//! - Detect the winner

pub mod engine;

pub use engine::{GameResult, RulesEngine};

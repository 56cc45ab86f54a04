//! Game implementations on top of the `RulesEngine` trait.

pub mod dog;

pub use dog::{Dog, TurnPhase};

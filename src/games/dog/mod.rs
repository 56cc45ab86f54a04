//! Dog: a four-player partnered marble race driven by playing cards.
//!
//! Seats `{0, 2}` and `{1, 3}` play as teams. Cards move marbles from the
//! kennel onto the shared 64-square track and on into each seat's home
//! stretch; the first team with all eight marbles home wins.
//!
//! ## Layout
//!
//! - `movegen`: legal action generation and the shared validity checks
//! - `apply`: validated board mutations (entry, move, swap, split step)
//! - `game`: the `Dog` engine with its turn and round state machine
//!
//! ```
//! use rust_dog::games::dog::Dog;
//! use rust_dog::rules::RulesEngine;
//!
//! let mut dog = Dog::seeded(42);
//! let actions = dog.get_list_action();
//! dog.apply_action(actions.first());
//! assert_eq!(dog.history().len(), 1);
//! ```

pub mod apply;
pub mod game;
pub mod movegen;

pub use game::{Dog, TurnPhase};
pub use movegen::SEVEN_STEPS;

//! Player strategies and a driver that plays whole games with them.
//!
//! A strategy only ever sees its own seat's view of the state (other hands
//! masked) and the legal action list. Returning `None` answers with the
//! null action: fold, pass, or cancel a split move.

mod driver;
mod policy;

pub use driver::{play_game, GameOutcome};
pub use policy::{FirstActionStrategy, RandomStrategy, Strategy};

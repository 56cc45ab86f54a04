//! Cards and dealing.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: closed enumerations; `Rank` carries the movement table
//! - `Card`: immutable suit/rank value, plus the wild and hidden constants
//!
//! ## Dealing
//!
//! `deck` owns the static deck composition and the per-round hand sizes,
//! and deals hands out of a `GameState`'s piles.

pub mod card;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use deck::{base_set, deal_round, full_deck, round_size, shuffled_deck, DEFAULT_ROUND_SIZES};

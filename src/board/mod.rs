//! Board geometry: track, kennels and home stretches in one coordinate space.
//!
//! Stateless helpers used by the action generator and the applier.

pub mod geometry;

pub use geometry::{
    advance, entry_square, forward_distance, home_owner, home_start, is_any_home, is_in_home,
    is_in_kennel, is_on_track, kennel_squares, kennel_start, path_between, travel_path, Path,
    Position, MARBLES_PER_PLAYER, TRACK_LEN,
};

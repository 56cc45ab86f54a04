//! Board coordinates.
//!
//! One integer space covers the whole board:
//!
//! ```text
//!  0 ..= 63      shared circular track, seat i enters at 16·i
//! 64 + 8·i + 0..=3   seat i's kennel
//! 64 + 8·i + 4..=7   seat i's home stretch
//! ```
//!
//! Everything here is a pure function of its arguments. Range validity of a
//! result (e.g. overshooting a home stretch) is the caller's business.

use smallvec::SmallVec;

use crate::core::player::{PlayerId, PLAYER_COUNT};

/// A square on the board.
pub type Position = i32;

/// Number of squares on the shared track.
pub const TRACK_LEN: Position = 64;

/// Distance between two neighbouring seats' entry squares.
pub const SEAT_SPACING: Position = 16;

/// Squares reserved per seat after the track (kennel + home stretch).
pub const PRIVATE_SQUARES: Position = 8;

/// Marbles per seat; also the size of each kennel and home stretch.
pub const MARBLES_PER_PLAYER: usize = 4;

/// Path buffer; the longest single move covers 14 squares.
pub type Path = SmallVec<[Position; 16]>;

/// The track square where a seat's marbles come into play.
#[must_use]
pub const fn entry_square(player: PlayerId) -> Position {
    SEAT_SPACING * player.0 as Position
}

/// First kennel square of a seat.
#[must_use]
pub const fn kennel_start(player: PlayerId) -> Position {
    TRACK_LEN + PRIVATE_SQUARES * player.0 as Position
}

/// First home-stretch square of a seat.
#[must_use]
pub const fn home_start(player: PlayerId) -> Position {
    kennel_start(player) + MARBLES_PER_PLAYER as Position
}

#[must_use]
pub const fn is_on_track(pos: Position) -> bool {
    0 <= pos && pos < TRACK_LEN
}

#[must_use]
pub const fn is_in_kennel(pos: Position, player: PlayerId) -> bool {
    let start = kennel_start(player);
    start <= pos && pos < start + MARBLES_PER_PLAYER as Position
}

#[must_use]
pub const fn is_in_home(pos: Position, player: PlayerId) -> bool {
    let start = home_start(player);
    start <= pos && pos < start + MARBLES_PER_PLAYER as Position
}

/// The seat whose home stretch contains `pos`, if any.
#[must_use]
pub fn home_owner(pos: Position) -> Option<PlayerId> {
    PlayerId::all().find(|&p| is_in_home(pos, p))
}

/// Check if `pos` lies in any seat's home stretch.
#[must_use]
pub fn is_any_home(pos: Position) -> bool {
    home_owner(pos).is_some()
}

/// All kennel squares of a seat, lowest first.
pub fn kennel_squares(player: PlayerId) -> impl Iterator<Item = Position> {
    let start = kennel_start(player);
    start..start + MARBLES_PER_PLAYER as Position
}

/// Move `steps` squares from `pos` on behalf of `player`.
///
/// From the track the raw sum is kept when it falls inside the player's own
/// home stretch, otherwise it wraps around the track. From anywhere else
/// the result is plain addition.
///
/// A raw sum tops out at 63 + 13 = 76, so seat 0 reaches its home stretch
/// from several squares, seat 1 only from 63 with a King, and seats 2 and
/// 3 never.
#[must_use]
pub const fn advance(player: PlayerId, pos: Position, steps: Position) -> Position {
    if is_on_track(pos) {
        let raw = pos + steps;
        if is_in_home(raw, player) {
            raw
        } else {
            raw.rem_euclid(TRACK_LEN)
        }
    } else {
        pos + steps
    }
}

/// Inclusive ordered positions from `from` to `to`.
///
/// Wraps around the track when both ends are on it and `to < from`.
/// Off-track ranges are ascending regardless of argument order.
#[must_use]
pub fn path_between(from: Position, to: Position) -> Path {
    if is_on_track(from) && is_on_track(to) && to < from {
        (from..TRACK_LEN).chain(0..=to).collect()
    } else if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).collect()
    }
}

/// Squares a marble crosses moving from `from` to `to`, in travel order,
/// origin excluded and destination included.
///
/// `forward` selects the travel direction; backward moves walk the
/// forward path in reverse.
#[must_use]
pub fn travel_path(from: Position, to: Position, forward: bool) -> Path {
    if forward {
        path_between(from, to).into_iter().skip(1).collect()
    } else {
        path_between(to, from).into_iter().rev().skip(1).collect()
    }
}

/// Forward distance between two squares as counted for split moves.
///
/// Wraps on the track; elsewhere it is the plain difference.
#[must_use]
pub const fn forward_distance(from: Position, to: Position) -> Position {
    if is_on_track(from) && is_on_track(to) {
        (to - from).rem_euclid(TRACK_LEN)
    } else {
        to - from
    }
}

/// Total number of squares on the board.
#[must_use]
pub const fn board_size() -> Position {
    TRACK_LEN + PRIVATE_SQUARES * PLAYER_COUNT as Position
}

//! Board mutations.
//!
//! Each function validates with the generator's rule first and only then
//! touches the state, so an `Err` always means nothing changed.

use tracing::trace;

use super::movegen;
use crate::board::{self, Position};
use crate::cards::Card;
use crate::core::{ActionError, GameState, PlayerId};

/// Capture whatever non-own marble sits on the track square `pos`.
fn capture(state: &mut GameState, seat: PlayerId, pos: Position) {
    if !board::is_on_track(pos) {
        return;
    }
    if let Some((owner, idx)) = state.marble_at(pos) {
        if owner != seat {
            trace!(%owner, pos, "marble captured");
            state.send_to_kennel(owner, idx);
        }
    }
}

/// Move `seat`'s marble from `from` to `to`, setting its safe flag.
fn relocate(state: &mut GameState, seat: PlayerId, from: Position, to: Position, safe: bool) -> Result<(), ActionError> {
    let idx = state
        .own_marble_at(seat, from)
        .ok_or(ActionError::NoMarbleAt { pos: from })?;
    let marble = &mut state.players[seat].marbles[idx];
    marble.position = to;
    marble.safe = safe;
    Ok(())
}

/// Bring a kennel marble onto the entry square, capturing an occupant.
pub fn enter(state: &mut GameState, seat: PlayerId, card: Card, from: Position, to: Position) -> Result<(), ActionError> {
    let entry = movegen::check_entry(state, seat, from)?;
    if to != entry {
        return Err(ActionError::Unreachable { card, from, to });
    }
    capture(state, seat, entry);
    relocate(state, seat, from, entry, true)
}

/// Move one marble by one of the card's step options, capturing on the
/// destination only.
pub fn step(state: &mut GameState, seat: PlayerId, card: Card, from: Position, to: Position) -> Result<(), ActionError> {
    let mut outcome = Err(ActionError::Unreachable { card, from, to });
    for &steps in card.rank.step_options() {
        if board::advance(seat, from, steps) != to {
            continue;
        }
        outcome = movegen::check_move(state, seat, card, from, steps);
        if outcome.is_ok() {
            break;
        }
    }
    outcome?;
    capture(state, seat, to);
    relocate(state, seat, from, to, false)
}

/// Exchange the positions of two marbles.
pub fn swap(state: &mut GameState, a: Position, b: Position) -> Result<(), ActionError> {
    movegen::check_swap(state, a, b)?;
    let (owner_a, idx_a) = state.marble_at(a).ok_or(ActionError::NoMarbleAt { pos: a })?;
    let (owner_b, idx_b) = state.marble_at(b).ok_or(ActionError::NoMarbleAt { pos: b })?;
    state.players[owner_a].marbles[idx_a].position = b;
    state.players[owner_b].marbles[idx_b].position = a;
    Ok(())
}

/// One part of a split move: `from` to `to` forward, at most `remaining`
/// squares. Every non-own marble passed on the track is captured along with
/// the one on the destination.
///
/// Returns the number of squares moved.
pub fn split_step(
    state: &mut GameState,
    seat: PlayerId,
    card: Card,
    from: Position,
    to: Position,
    remaining: i32,
) -> Result<i32, ActionError> {
    let steps = board::forward_distance(from, to);
    if steps < 1 || steps > remaining {
        return Err(ActionError::NoStepBudget { steps, remaining });
    }
    if movegen::check_move(state, seat, card, from, steps)? != to {
        return Err(ActionError::Unreachable { card, from, to });
    }
    for pos in board::travel_path(from, to, true) {
        capture(state, seat, pos);
    }
    relocate(state, seat, from, to, false)?;
    Ok(steps)
}

//! Legal action generation.
//!
//! Everything here reads a `GameState` and never mutates it. The `check_*`
//! functions are shared with the applier so an action is validated by the
//! exact rule that generated it.

use rustc_hash::FxHashSet;

use crate::board::{self, Position};
use crate::cards::{Card, Rank, Suit};
use crate::core::{Action, ActionError, GameState, PlayerId};

/// Steps a Seven distributes over one turn.
pub const SEVEN_STEPS: i32 = 7;

/// Ordered action list that drops repeated `(card, from, to, stand-in)`
/// entries.
#[derive(Debug, Default)]
pub struct ActionList {
    actions: Vec<Action>,
    seen: FxHashSet<Action>,
}

impl ActionList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action unless an identical one is already listed.
    pub fn push(&mut self, action: Action) {
        if self.seen.insert(action) {
            self.actions.push(action);
        }
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.push(action);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Action> {
        self.actions
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validate bringing the marble on kennel square `from` onto `seat`'s entry
/// square. Returns the entry square.
pub fn check_entry(state: &GameState, seat: PlayerId, from: Position) -> Result<Position, ActionError> {
    if !board::is_in_kennel(from, seat) || state.own_marble_at(seat, from).is_none() {
        return Err(ActionError::NoMarbleAt { pos: from });
    }
    let entry = board::entry_square(seat);
    match state.marble_on(entry) {
        Some((owner, _)) if owner == seat => Err(ActionError::EntryBlocked),
        Some((_, marble)) if marble.safe => Err(ActionError::EntryBlocked),
        _ => Ok(entry),
    }
}

/// Validate moving `seat`'s marble on `from` by `steps` squares. Returns
/// the destination.
///
/// A move is refused when:
/// - the source is not one of the seat's marbles outside the kennel
/// - the destination is neither on the track nor in the seat's home stretch
/// - a backward move would end in a home stretch
/// - a safe marble sits anywhere along the way, destination included
/// - the destination holds one of the seat's own marbles, or any marble in
///   a home stretch
pub fn check_move(
    state: &GameState,
    seat: PlayerId,
    card: Card,
    from: Position,
    steps: i32,
) -> Result<Position, ActionError> {
    if board::is_in_kennel(from, seat) || state.own_marble_at(seat, from).is_none() {
        return Err(ActionError::NoMarbleAt { pos: from });
    }
    let to = board::advance(seat, from, steps);
    let unreachable = ActionError::Unreachable { card, from, to };

    if !board::is_on_track(to) && !board::is_in_home(to, seat) {
        return Err(unreachable);
    }
    if steps < 0 && board::is_in_home(to, seat) {
        return Err(unreachable);
    }
    if let Some(pos) = board::travel_path(from, to, steps > 0)
        .into_iter()
        .find(|&pos| state.is_blocking(pos))
    {
        return Err(ActionError::BlockedBySafe { pos });
    }
    match state.marble_on(to) {
        Some((owner, _)) if owner == seat => Err(ActionError::OwnMarble { pos: to }),
        Some(_) if board::is_any_home(to) => Err(ActionError::HomeOccupied { pos: to }),
        _ => Ok(to),
    }
}

/// Can the marble on `pos` take part in a Jack swap?
#[must_use]
pub fn is_swappable(state: &GameState, pos: Position) -> bool {
    board::is_on_track(pos) && state.marble_at(pos).is_some() && !state.is_blocking(pos)
}

/// Validate swapping the marbles on `a` and `b`.
pub fn check_swap(state: &GameState, a: Position, b: Position) -> Result<(), ActionError> {
    for pos in [a, b] {
        if !is_swappable(state, pos) {
            return Err(ActionError::NotSwappable { pos });
        }
    }
    if a == b {
        return Err(ActionError::NotSwappable { pos: a });
    }
    Ok(())
}

/// Stand-ins a wild card may take for `seat` right now.
///
/// In round one, while every marble of the seat is still in the kennel,
/// only the entering ranks are offered.
pub fn stand_ins(state: &GameState, seat: PlayerId) -> impl Iterator<Item = Card> {
    let ranks: &'static [Rank] = if state.round == 1 && state.all_in_kennel(seat) {
        &Rank::STARTERS
    } else {
        &Rank::CONCRETE
    };
    Suit::ALL
        .into_iter()
        .flat_map(move |suit| ranks.iter().map(move |&rank| Card::new(suit, rank)))
}

#[must_use]
pub fn is_allowed_stand_in(state: &GameState, seat: PlayerId, card: Card) -> bool {
    stand_ins(state, seat).any(|c| c == card)
}

/// Steps already taken in the current split move: the summed forward
/// distance of each of the seat's marbles between the two states.
///
/// Marbles keep their slot in `PlayerState::marbles` while moving, and a
/// seat never captures its own marbles, so slots pair up one to one.
#[must_use]
pub fn seven_steps_used(before: &GameState, after: &GameState, seat: PlayerId) -> i32 {
    before.players[seat]
        .marbles
        .iter()
        .zip(&after.players[seat].marbles)
        .map(|(old, new)| board::forward_distance(old.position, new.position))
        .filter(|&d| d > 0)
        .sum()
}

// =============================================================================
// Generators
// =============================================================================

/// Entry actions: one per kennel marble when the entry square is free or
/// holds a capturable marble.
pub fn start_actions(state: &GameState, seat: PlayerId, card: Card) -> Vec<Action> {
    state
        .kennel_marbles(seat)
        .filter_map(|from| {
            check_entry(state, seat, from)
                .ok()
                .map(|to| Action::moving(card, from, to))
        })
        .collect()
}

/// Single-marble moves for every step option of the card's rank.
pub fn normal_moves(state: &GameState, seat: PlayerId, card: Card) -> Vec<Action> {
    let steps = card.rank.step_options();
    state.players[seat]
        .marbles
        .iter()
        .flat_map(|m| steps.iter().map(move |&st| (m.position, st)))
        .filter_map(|(from, st)| {
            check_move(state, seat, card, from, st)
                .ok()
                .map(|to| Action::moving(card, from, to))
        })
        .collect()
}

/// Every ordered pair of distinct swappable marbles, any owner.
pub fn jack_swaps(state: &GameState, card: Card) -> Vec<Action> {
    let candidates: Vec<Position> = state
        .players
        .values()
        .flat_map(|p| p.marbles.iter().map(|m| m.position))
        .filter(|&pos| is_swappable(state, pos))
        .collect();

    let mut actions = Vec::with_capacity(candidates.len() * candidates.len());
    for &a in &candidates {
        for &b in &candidates {
            if a != b {
                actions.push(Action::moving(card, a, b));
            }
        }
    }
    actions
}

/// Split-move steps of `1..=remaining` squares for each active marble.
pub fn seven_steps(state: &GameState, seat: PlayerId, card: Card, remaining: i32) -> Vec<Action> {
    let mut list = ActionList::new();
    for marble in &state.players[seat].marbles {
        for step in 1..=remaining {
            if let Ok(to) = check_move(state, seat, card, marble.position, step) {
                list.push(Action::moving(card, marble.position, to));
            }
        }
    }
    list.into_vec()
}

/// Stand-in choices for a wild card.
pub fn substitute_choices(state: &GameState, seat: PlayerId, wild: Card) -> Vec<Action> {
    stand_ins(state, seat)
        .map(|stand_in| Action::substitute(wild, stand_in))
        .collect()
}

/// Actions for a concrete card played as its own rank. A Seven starts a
/// fresh split move. Wild and hidden cards yield nothing here.
pub fn rank_actions(state: &GameState, seat: PlayerId, card: Card, out: &mut ActionList) {
    match card.rank {
        Rank::Seven => out.extend(seven_steps(state, seat, card, SEVEN_STEPS)),
        Rank::Jack => out.extend(jack_swaps(state, card)),
        Rank::Joker | Rank::Hidden => {}
        rank => {
            if rank.can_enter() {
                out.extend(start_actions(state, seat, card));
            }
            out.extend(normal_moves(state, seat, card));
        }
    }
}

/// Actions for every card in `seat`'s hand during normal play.
pub fn hand_actions(state: &GameState, seat: PlayerId) -> Vec<Action> {
    let mut list = ActionList::new();
    for &card in &state.players[seat].hand {
        if card.is_joker() {
            list.extend(substitute_choices(state, seat, card));
        } else {
            rank_actions(state, seat, card, &mut list);
        }
    }
    list.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Marble};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state() -> GameState {
        GameState::new(&GameConfig::default())
    }

    fn place(state: &mut GameState, seat: PlayerId, idx: usize, position: Position, safe: bool) {
        state.players[seat].marbles[idx] = Marble { position, safe };
    }

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Spades, rank)
    }

    #[test]
    fn test_action_list_dedup() {
        let mut list = ActionList::new();
        let a = Action::moving(card(Rank::Two), 1, 3);
        list.push(a);
        list.push(a);
        list.push(Action::moving(card(Rank::Two), 2, 4));
        assert_eq!(list.len(), 2);
        assert_eq!(list.into_vec()[0], a);
    }

    #[test]
    fn test_entry_open_and_blocked() {
        let mut state = state();
        assert_eq!(start_actions(&state, P0, card(Rank::Ace)).len(), 4);

        // Own marble on the entry square blocks
        place(&mut state, P0, 0, 0, true);
        assert!(start_actions(&state, P0, card(Rank::Ace)).is_empty());

        // Opponent marble that is not safe can be captured on entry
        place(&mut state, P0, 0, 64, false);
        place(&mut state, P1, 0, 0, false);
        let actions = start_actions(&state, P0, card(Rank::King));
        assert_eq!(actions.len(), 4);
        assert!(actions.iter().all(|a| a.pos_to == Some(0)));
    }

    #[test]
    fn test_entry_needs_kennel_marble() {
        let mut state = state();
        for idx in 0..4 {
            place(&mut state, P0, idx, 10 + idx as Position, false);
        }
        assert!(start_actions(&state, P0, card(Rank::Ace)).is_empty());
    }

    #[test]
    fn test_normal_moves_basic() {
        let mut state = state();
        place(&mut state, P0, 0, 10, false);

        let actions = normal_moves(&state, P0, card(Rank::Ace));
        let targets: Vec<_> = actions.iter().map(|a| a.pos_to.unwrap()).collect();
        assert_eq!(targets, vec![11, 21]);

        let actions = normal_moves(&state, P0, card(Rank::Four));
        let targets: Vec<_> = actions.iter().map(|a| a.pos_to.unwrap()).collect();
        assert_eq!(targets, vec![14, 6]);
    }

    #[test]
    fn test_safe_marble_blocks_path_and_destination() {
        let mut state = state();
        place(&mut state, P0, 0, 10, false);
        place(&mut state, P1, 0, 16, true);

        assert!(matches!(
            check_move(&state, P0, card(Rank::Eight), 10, 8),
            Err(ActionError::BlockedBySafe { pos: 16 })
        ));
        assert!(matches!(
            check_move(&state, P0, card(Rank::Six), 10, 6),
            Err(ActionError::BlockedBySafe { pos: 16 })
        ));
        assert_eq!(check_move(&state, P0, card(Rank::Five), 10, 5), Ok(15));
    }

    #[test]
    fn test_unsafe_marble_on_entry_does_not_block() {
        let mut state = state();
        place(&mut state, P0, 0, 10, false);
        place(&mut state, P1, 0, 16, false);

        assert_eq!(check_move(&state, P0, card(Rank::Eight), 10, 8), Ok(18));
        assert_eq!(check_move(&state, P0, card(Rank::Six), 10, 6), Ok(16));
    }

    #[test]
    fn test_backward_move_blocked_behind() {
        let mut state = state();
        place(&mut state, P0, 0, 18, false);
        place(&mut state, P1, 0, 16, true);

        assert!(check_move(&state, P0, card(Rank::Four), 18, -4).is_err());
        // Moving forward away from it is fine
        assert_eq!(check_move(&state, P0, card(Rank::Four), 18, 4), Ok(22));
    }

    #[test]
    fn test_own_marble_on_destination() {
        let mut state = state();
        place(&mut state, P0, 0, 10, false);
        place(&mut state, P0, 1, 13, false);

        assert!(matches!(
            check_move(&state, P0, card(Rank::Three), 10, 3),
            Err(ActionError::OwnMarble { pos: 13 })
        ));
    }

    #[test]
    fn test_home_stretch_moves() {
        let mut state = state();
        // Seat 0 enters home (68..=71) from the track
        place(&mut state, P0, 0, 60, false);
        assert_eq!(check_move(&state, P0, card(Rank::Eight), 60, 8), Ok(68));

        // Inside home only forward and only within range
        place(&mut state, P0, 0, 68, false);
        assert_eq!(check_move(&state, P0, card(Rank::Two), 68, 2), Ok(70));
        assert!(check_move(&state, P0, card(Rank::Five), 68, 5).is_err());
        assert!(check_move(&state, P0, card(Rank::Four), 68, -4).is_err());
    }

    #[test]
    fn test_kennel_marbles_do_not_move() {
        let state = state();
        assert!(normal_moves(&state, P0, card(Rank::Five)).is_empty());
        assert!(seven_steps(&state, P0, card(Rank::Seven), SEVEN_STEPS).is_empty());
    }

    #[test]
    fn test_jack_swaps() {
        let mut state = state();
        place(&mut state, P0, 0, 5, false);
        place(&mut state, P1, 0, 30, false);
        place(&mut state, P1, 1, 16, true);
        place(&mut state, P0, 1, 69, false);

        let actions = jack_swaps(&state, card(Rank::Jack));
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action::moving(card(Rank::Jack), 5, 30)));
        assert!(actions.contains(&Action::moving(card(Rank::Jack), 30, 5)));

        assert!(check_swap(&state, 5, 16).is_err());
        assert!(check_swap(&state, 5, 69).is_err());
        assert!(check_swap(&state, 5, 5).is_err());
    }

    #[test]
    fn test_seven_steps_budget() {
        let mut state = state();
        place(&mut state, P0, 0, 10, false);
        place(&mut state, P0, 1, 40, false);

        assert_eq!(seven_steps(&state, P0, card(Rank::Seven), 7).len(), 14);
        let limited = seven_steps(&state, P0, card(Rank::Seven), 3);
        assert_eq!(limited.len(), 6);
        assert!(limited
            .iter()
            .all(|a| board::forward_distance(a.pos_from.unwrap(), a.pos_to.unwrap()) <= 3));
    }

    #[test]
    fn test_seven_steps_used() {
        let mut before = state();
        place(&mut before, P0, 0, 10, false);
        place(&mut before, P0, 1, 60, false);

        let mut after = before.clone();
        place(&mut after, P0, 0, 13, false);
        place(&mut after, P0, 1, 1, false);

        assert_eq!(seven_steps_used(&before, &after, P0), 3 + 5);
        assert_eq!(seven_steps_used(&before, &before, P0), 0);
    }

    #[test]
    fn test_stand_ins_restricted_at_start() {
        let mut state = state();
        let choices: Vec<_> = stand_ins(&state, P0).collect();
        assert_eq!(choices.len(), 8);
        assert!(choices.iter().all(|c| c.rank.can_enter()));

        place(&mut state, P0, 0, 3, false);
        assert_eq!(stand_ins(&state, P0).count(), 52);

        place(&mut state, P0, 0, 64, false);
        state.round = 2;
        assert_eq!(stand_ins(&state, P0).count(), 52);
        assert!(!is_allowed_stand_in(&state, P0, Card::JOKER));
    }

    #[test]
    fn test_hand_actions_dedup_identical_cards() {
        let mut state = state();
        let ace = card(Rank::Ace);
        state.players[P0].hand = vec![ace, ace];

        assert_eq!(hand_actions(&state, P0).len(), 4);
    }

    #[test]
    fn test_hand_actions_joker_only_offers_stand_ins() {
        let mut state = state();
        state.players[P0].hand = vec![Card::JOKER];

        let actions = hand_actions(&state, P0);
        assert_eq!(actions.len(), 8);
        assert!(actions.iter().all(|a| a.card_swap.is_some() && !a.is_move()));
    }
}

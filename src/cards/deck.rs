//! Deck composition and dealing.
//!
//! A base set is 13 ranks × 4 suits plus 3 wild cards (55 cards); a game
//! uses two copies. Hand size per round follows a fixed cycle.

use im::Vector;
use tracing::warn;

use super::card::{Card, Rank, Suit};
use crate::core::rng::GameRng;
use crate::core::state::GameState;

/// Wild cards in one base set.
pub const JOKERS_PER_SET: usize = 3;

/// Cards in one base set.
pub const BASE_SET_SIZE: usize = Rank::CONCRETE.len() * Suit::ALL.len() + JOKERS_PER_SET;

/// Hand size cycle, indexed by `(round - 1) mod 5`.
pub const DEFAULT_ROUND_SIZES: [usize; 5] = [6, 5, 4, 3, 2];

/// One base set in deck order: ranks ascending, suits within each rank,
/// wild cards last.
#[must_use]
pub fn base_set() -> Vec<Card> {
    let mut cards: Vec<Card> = Rank::CONCRETE
        .iter()
        .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::new(suit, rank)))
        .collect();
    cards.extend(std::iter::repeat(Card::JOKER).take(JOKERS_PER_SET));
    cards
}

/// `copies` base sets back to back, unshuffled.
#[must_use]
pub fn full_deck(copies: usize) -> Vec<Card> {
    let set = base_set();
    let mut deck = Vec::with_capacity(set.len() * copies);
    for _ in 0..copies {
        deck.extend_from_slice(&set);
    }
    deck
}

/// A freshly shuffled draw pile.
#[must_use]
pub fn shuffled_deck(copies: usize, rng: &mut GameRng) -> Vector<Card> {
    let mut deck = full_deck(copies);
    rng.shuffle(&mut deck);
    deck.into_iter().collect()
}

/// Hand size for a (1-based) round.
///
/// ```
/// use rust_dog::cards::deck::{round_size, DEFAULT_ROUND_SIZES};
///
/// let sizes: Vec<_> = (1..=7).map(|r| round_size(r, &DEFAULT_ROUND_SIZES)).collect();
/// assert_eq!(sizes, vec![6, 5, 4, 3, 2, 6, 5]);
/// ```
#[must_use]
pub fn round_size(round: u32, sizes: &[usize]) -> usize {
    if sizes.is_empty() {
        return 0;
    }
    let idx = (round.max(1) as usize - 1) % sizes.len();
    sizes[idx]
}

/// Turn the discard pile into a fresh draw pile once the draw pile is empty.
///
/// Returns true if a reshuffle happened.
pub fn reshuffle_if_empty(
    draw: &mut Vector<Card>,
    discard: &mut Vector<Card>,
    rng: &mut GameRng,
) -> bool {
    if !draw.is_empty() || discard.is_empty() {
        return false;
    }
    let mut cards: Vec<Card> = discard.iter().copied().collect();
    discard.clear();
    rng.shuffle(&mut cards);
    *draw = cards.into_iter().collect();
    true
}

/// Deal the hands for `state.round`.
///
/// Any card still held goes to the discard pile first. Cards are dealt one
/// at a time in seat order, reshuffling the discard pile whenever the draw
/// pile runs dry. Stops early if both piles are empty.
///
/// Returns the number of cards dealt.
pub fn deal_round(state: &mut GameState, sizes: &[usize], rng: &mut GameRng) -> usize {
    let hand_size = round_size(state.round, sizes);

    for (_, player) in state.players.iter_mut() {
        for card in player.hand.drain(..) {
            state.discard_pile.push_back(card);
        }
    }
    reshuffle_if_empty(&mut state.draw_pile, &mut state.discard_pile, rng);

    let mut dealt = 0;
    for (seat, player) in state.players.iter_mut() {
        for _ in 0..hand_size {
            reshuffle_if_empty(&mut state.draw_pile, &mut state.discard_pile, rng);
            let Some(card) = state.draw_pile.pop_front() else {
                warn!(%seat, round = state.round, dealt, "both piles exhausted while dealing");
                return dealt;
            };
            player.hand.push(card);
            dealt += 1;
        }
    }
    dealt
}

//! Round cycle, partner exchange and dealing over whole games.

use rust_dog::cards::{deal_round, full_deck, round_size, DEFAULT_ROUND_SIZES};
use rust_dog::core::{GameConfig, GameRng, GameState, PlayerId, PlayerMap};
use rust_dog::games::dog::{Dog, TurnPhase};
use rust_dog::rules::RulesEngine;
use rust_dog::strategy::{RandomStrategy, Strategy};

fn random_table(seed: u64) -> PlayerMap<Box<dyn Strategy>> {
    PlayerMap::new(|seat| Box::new(RandomStrategy::new(seed * 10 + seat.index() as u64)) as Box<dyn Strategy>)
}

/// Step a game with random strategies, calling `on_step` after every action.
fn drive(dog: &mut Dog, seed: u64, max_steps: usize, mut on_step: impl FnMut(&Dog)) {
    let mut strategies = random_table(seed);
    for _ in 0..max_steps {
        if dog.is_terminal().is_some() {
            break;
        }
        let seat = dog.active_player();
        let actions = dog.get_list_action();
        let view = dog.get_player_view(seat);
        let chosen = strategies[seat].select_action(&view, &actions);
        dog.apply_action(chosen.as_ref());
        on_step(dog);
    }
}

#[test]
fn test_round_size_cycle() {
    let sizes: Vec<usize> = (1..=10).map(|r| round_size(r, &DEFAULT_ROUND_SIZES)).collect();
    assert_eq!(sizes, vec![6, 5, 4, 3, 2, 6, 5, 4, 3, 2]);
}

#[test]
fn test_hands_follow_cycle_during_play() {
    let mut dog = Dog::seeded(4);
    let mut observed = vec![(dog.get_state().round, dog.get_state().players[PlayerId::new(0)].hand.len())];

    drive(&mut dog, 4, 20_000, |dog| {
        let state = dog.get_state();
        let last_round = observed.last().map_or(0, |&(round, _)| round);
        if state.round != last_round && state.round <= 10 {
            assert!(state.players.values().all(|p| p.hand.len() == round_size(state.round, &DEFAULT_ROUND_SIZES)));
            observed.push((state.round, state.players[state.active_player].hand.len()));
        }
    });

    let sizes: Vec<usize> = observed.iter().map(|&(_, size)| size).collect();
    let expected = [6, 5, 4, 3, 2, 6, 5, 4, 3, 2];
    assert!(sizes.len() >= 3, "game ended after {} rounds", sizes.len());
    assert_eq!(sizes[..], expected[..sizes.len()]);
}

#[test]
fn test_starting_player_rotates() {
    let mut dog = Dog::seeded(8);
    let mut starters = vec![dog.get_state().starting_player];

    drive(&mut dog, 8, 5_000, |dog| {
        let state = dog.get_state();
        if state.round as usize > starters.len() {
            starters.push(state.starting_player);
            assert_eq!(state.active_player, state.starting_player);
            assert!(!state.card_exchanged);
        }
    });

    for pair in starters.windows(2) {
        assert_eq!(pair[1], pair[0].next());
    }
}

#[test]
fn test_exchange_happens_every_round() {
    let mut dog = Dog::seeded(12);
    let mut exchanges_seen = 0;
    let mut last_phase = dog.turn_phase();

    drive(&mut dog, 12, 5_000, |dog| {
        let phase = dog.turn_phase();
        if last_phase == TurnPhase::Exchange && phase != TurnPhase::Exchange {
            exchanges_seen += 1;
            assert!(dog.get_state().card_exchanged);
            assert_eq!(dog.active_player(), dog.get_state().starting_player);
        }
        assert_eq!(dog.get_state().total_cards(), 110);
        last_phase = phase;
    });

    let rounds = dog.get_state().round;
    assert!(exchanges_seen >= rounds.saturating_sub(1) as usize);
}

#[test]
fn test_deal_reshuffles_discard() {
    let config = GameConfig::default();
    let mut rng = GameRng::new(5);
    let mut state = GameState::new(&config);
    state.discard_pile = full_deck(2).into_iter().collect();
    state.round = 1;

    let dealt = deal_round(&mut state, &config.round_sizes, &mut rng);

    assert_eq!(dealt, 24);
    assert_eq!(state.discard_pile.len(), 0);
    assert_eq!(state.draw_pile.len(), 110 - 24);
    assert_eq!(state.total_cards(), 110);
}

#[test]
fn test_custom_round_sizes() {
    let config = GameConfig::default().with_round_sizes(vec![2, 1]).with_seed(3);
    let dog = Dog::new_game(config).unwrap();
    assert!(dog.get_state().players.values().all(|p| p.hand.len() == 2));
}

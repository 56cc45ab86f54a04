//! The Dog engine: turn and round state machine over `movegen` and `apply`.
//!
//! ## Phases
//!
//! ```text
//! Exchange → Normal → (SevenSequence | WildcardPending | WildcardActive)* → Normal → … → Finished
//! ```
//!
//! The phase is never stored. It is derived from the snapshot
//! (`card_exchanged`, `card_active`, `phase`) so a state loaded with
//! `set_state` resumes exactly where it left off.
//!
//! ## Engine-only bookkeeping
//!
//! - Exchange buffer: one pending card per seat during the partner exchange
//! - Wild flag: the active card is a stand-in for a wild card in hand
//! - Split-move backup: the state right before the first step of a Seven

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::apply;
use super::movegen::{self, ActionList, SEVEN_STEPS};
use crate::board;
use crate::cards::{deck, Card, Rank};
use crate::core::{
    Action, ActionError, ActionRecord, ConfigError, GameConfig, GamePhase, GameRng, GameRngState, GameState,
    PlayerId, PlayerMap, SnapshotError, PLAYER_COUNT,
};
use crate::rules::RulesEngine;

/// Where the turn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Partner exchange at the start of a round.
    Exchange,
    /// Any card from hand may be played.
    Normal,
    /// A wild card is being played and no stand-in is chosen yet.
    WildcardPending,
    /// A wild card plays as this stand-in.
    WildcardActive(Card),
    /// A split move with this Seven is in progress.
    SevenSequence(Card),
    Finished,
}

/// The game engine.
#[derive(Clone, Debug)]
pub struct Dog {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    exchange_buffer: PlayerMap<Option<Card>>,
    wild_chosen: bool,
    seven_backup: Option<Box<GameState>>,
    history: Vector<ActionRecord>,
}

/// Everything `Dog` needs to pick up a game again, shuffle position
/// included.
#[derive(Serialize, Deserialize)]
struct Checkpoint {
    config: GameConfig,
    state: GameState,
    rng: GameRngState,
    exchange_buffer: PlayerMap<Option<Card>>,
    wild_chosen: bool,
    seven_backup: Option<Box<GameState>>,
    history: Vector<ActionRecord>,
}

impl Dog {
    /// Start a game from a validated configuration. Seeds from the
    /// configured seed, or from the OS when there is none.
    pub fn new_game(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Ok(Self::with_rng(config, rng))
    }

    /// Start a game with an injected shuffle provider.
    ///
    /// The configuration is used as is.
    #[must_use]
    pub fn with_rng(config: GameConfig, rng: GameRng) -> Self {
        let mut dog = Self {
            state: GameState::new(&config),
            config,
            rng,
            exchange_buffer: PlayerMap::with_default(),
            wild_chosen: false,
            seven_backup: None,
            history: Vector::new(),
        };
        dog.reset();
        dog
    }

    /// Default configuration with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(GameConfig::default().with_seed(seed), GameRng::new(seed))
    }

    /// Fresh shuffle, all marbles to the kennel, round 1, random starting
    /// seat. The engine's RNG keeps running, so consecutive resets differ.
    pub fn reset(&mut self) {
        let mut state = GameState::new(&self.config);
        state.draw_pile = deck::shuffled_deck(self.config.deck_copies, &mut self.rng);
        let starter = PlayerId::new(self.rng.gen_range_usize(0..PLAYER_COUNT) as u8);
        state.starting_player = starter;
        state.active_player = starter;
        deck::deal_round(&mut state, &self.config.round_sizes, &mut self.rng);

        self.state = state;
        self.clear_transient();
        self.history = Vector::new();
        info!(seed = self.rng.seed(), %starter, "new game");
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Every accepted action so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        if self.state.is_finished() {
            return TurnPhase::Finished;
        }
        if !self.state.card_exchanged {
            return TurnPhase::Exchange;
        }
        match self.state.card_active {
            None => TurnPhase::Normal,
            Some(card) if card.is_joker() => TurnPhase::WildcardPending,
            Some(card) if card.rank == Rank::Seven => TurnPhase::SevenSequence(card),
            Some(card) => TurnPhase::WildcardActive(card),
        }
    }

    /// Steps left in the current split move.
    #[must_use]
    pub fn seven_remaining(&self) -> i32 {
        match &self.seven_backup {
            Some(before) => {
                SEVEN_STEPS - movegen::seven_steps_used(before, &self.state, self.state.active_player)
            }
            None => SEVEN_STEPS,
        }
    }

    /// Apply an action, returning why it was refused. The state is
    /// untouched on `Err`.
    pub fn try_apply_action(&mut self, action: Option<&Action>) -> Result<(), ActionError> {
        let seat = self.state.active_player;
        let round = self.state.round;

        match (self.turn_phase(), action) {
            (TurnPhase::Finished, _) => return Err(ActionError::GameFinished),
            (TurnPhase::Exchange, None) => self.abandon_exchange(seat)?,
            (TurnPhase::Exchange, Some(action)) => self.exchange_pick(seat, action)?,
            (TurnPhase::Normal, None)
            | (TurnPhase::WildcardPending, None)
            | (TurnPhase::WildcardActive(_), None) => self.fold(seat),
            (TurnPhase::Normal, Some(action)) => self.play_card(seat, action)?,
            (TurnPhase::WildcardPending, Some(action)) => self.choose_substitute(seat, action)?,
            (TurnPhase::WildcardActive(stand_in), Some(action)) => {
                self.play_stand_in(seat, stand_in, action)?;
            }
            (TurnPhase::SevenSequence(_), None) => self.cancel_seven(seat),
            (TurnPhase::SevenSequence(card), Some(action)) => {
                if action.card != card {
                    return Err(ActionError::PhaseMismatch { card: action.card });
                }
                self.seven_step(seat, action)?;
            }
        }

        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(seat, action.copied(), round, sequence));
        match action {
            Some(action) => trace!(%seat, %action, "action applied"),
            None => trace!(%seat, "no action"),
        }
        Ok(())
    }

    // =========================================================================
    // Exchange
    // =========================================================================

    fn exchange_pick(&mut self, seat: PlayerId, action: &Action) -> Result<(), ActionError> {
        if self.exchange_buffer[seat].is_some() {
            return Err(ActionError::ExchangeSlotFilled);
        }
        if action.is_move() || action.card_swap.is_some() {
            return Err(ActionError::PhaseMismatch { card: action.card });
        }
        if !self.state.players[seat].has_card(&action.card) {
            return Err(ActionError::NotInHand { card: action.card });
        }
        self.exchange_buffer[seat] = Some(action.card);

        let mut next = seat;
        for _ in 0..PLAYER_COUNT {
            next = next.next();
            if self.exchange_buffer[next].is_none() {
                self.state.active_player = next;
                return Ok(());
            }
        }
        self.perform_exchange();
        Ok(())
    }

    /// Move every buffered card to the giver's partner at once.
    fn perform_exchange(&mut self) {
        let picks: Vec<(PlayerId, Card)> = self
            .exchange_buffer
            .iter()
            .filter_map(|(seat, card)| card.map(|card| (seat, card)))
            .collect();
        for &(seat, card) in &picks {
            self.state.players[seat].remove_card(&card);
        }
        for &(seat, card) in &picks {
            self.state.players[seat.partner()].hand.push(card);
        }
        debug!(round = self.state.round, "cards exchanged");
        self.finish_exchange();
    }

    /// A seat with nothing to give ends the exchange for the round.
    fn abandon_exchange(&mut self, seat: PlayerId) -> Result<(), ActionError> {
        if self.exchange_buffer[seat].is_none() && !self.state.players[seat].hand.is_empty() {
            return Err(ActionError::ActionRequired);
        }
        debug!(%seat, round = self.state.round, "exchange abandoned");
        self.finish_exchange();
        Ok(())
    }

    fn finish_exchange(&mut self) {
        self.exchange_buffer = PlayerMap::with_default();
        self.state.card_exchanged = true;
        self.state.active_player = self.state.starting_player;
    }

    // =========================================================================
    // Card play
    // =========================================================================

    fn play_card(&mut self, seat: PlayerId, action: &Action) -> Result<(), ActionError> {
        if !self.state.players[seat].has_card(&action.card) {
            return Err(ActionError::NotInHand { card: action.card });
        }
        if action.card.is_joker() {
            return self.choose_substitute(seat, action);
        }
        if action.pos_from.is_none() && action.pos_to.is_none() {
            self.discard_play(seat, action.card);
            return Ok(());
        }
        if action.card.rank == Rank::Seven {
            return self.seven_step(seat, action);
        }
        self.play_move(seat, action.card, action)?;
        self.spend(seat, action.card);
        self.end_turn();
        Ok(())
    }

    /// Perform the board part of a single-action card as `card`.
    fn play_move(&mut self, seat: PlayerId, card: Card, action: &Action) -> Result<(), ActionError> {
        let (from, to) = action.squares().ok_or(ActionError::MissingPositions)?;
        match card.rank {
            Rank::Jack => apply::swap(&mut self.state, from, to),
            rank if rank.can_enter() && board::is_in_kennel(from, seat) => {
                apply::enter(&mut self.state, seat, card, from, to)
            }
            _ => apply::step(&mut self.state, seat, card, from, to),
        }
    }

    fn choose_substitute(&mut self, seat: PlayerId, action: &Action) -> Result<(), ActionError> {
        if !action.card.is_joker() {
            return Err(ActionError::PhaseMismatch { card: action.card });
        }
        if !self.state.players[seat].has_card(&action.card) {
            return Err(ActionError::NotInHand { card: action.card });
        }
        let stand_in = action
            .card_swap
            .ok_or(ActionError::PhaseMismatch { card: action.card })?;
        if !movegen::is_allowed_stand_in(&self.state, seat, stand_in) {
            return Err(ActionError::InvalidSubstitute { card: stand_in });
        }
        self.state.card_active = Some(stand_in);
        self.wild_chosen = true;
        debug!(%seat, %stand_in, "wild card stand-in chosen");
        Ok(())
    }

    fn play_stand_in(&mut self, seat: PlayerId, stand_in: Card, action: &Action) -> Result<(), ActionError> {
        if action.card != stand_in {
            return Err(ActionError::PhaseMismatch { card: action.card });
        }
        if !self.state.players[seat].has_card(&Card::JOKER) {
            return Err(ActionError::NotInHand { card: Card::JOKER });
        }
        if action.pos_from.is_none() && action.pos_to.is_none() {
            self.discard_play(seat, Card::JOKER);
            return Ok(());
        }
        self.play_move(seat, stand_in, action)?;
        self.spend(seat, Card::JOKER);
        self.state.card_active = None;
        self.wild_chosen = false;
        self.end_turn();
        Ok(())
    }

    /// A card played without a move is simply discarded.
    fn discard_play(&mut self, seat: PlayerId, card: Card) {
        debug!(%seat, %card, "card discarded without a move");
        self.spend(seat, card);
        self.state.card_active = None;
        self.wild_chosen = false;
        self.end_turn();
    }

    /// The card leaving the hand once the active play completes.
    fn card_to_spend(&self, played: Card) -> Card {
        if self.wild_chosen {
            Card::JOKER
        } else {
            played
        }
    }

    fn spend(&mut self, seat: PlayerId, card: Card) {
        if self.state.players[seat].remove_card(&card) {
            self.state.discard_pile.push_back(card);
        }
    }

    /// Discard the whole hand and pass.
    fn fold(&mut self, seat: PlayerId) {
        let hand = std::mem::take(&mut self.state.players[seat].hand);
        debug!(%seat, cards = hand.len(), "hand folded");
        self.state.discard_pile.extend(hand);
        self.state.card_active = None;
        self.wild_chosen = false;
        self.end_turn();
    }

    // =========================================================================
    // Split move
    // =========================================================================

    fn seven_step(&mut self, seat: PlayerId, action: &Action) -> Result<(), ActionError> {
        let (from, to) = action.squares().ok_or(ActionError::MissingPositions)?;
        let spent = self.card_to_spend(action.card);
        if !self.state.players[seat].has_card(&spent) {
            return Err(ActionError::NotInHand { card: spent });
        }

        let remaining = self.seven_remaining();
        let before = self.state.clone();
        apply::split_step(&mut self.state, seat, action.card, from, to, remaining)?;
        if self.seven_backup.is_none() {
            self.seven_backup = Some(Box::new(before));
        }
        self.state.card_active = Some(action.card);

        // A split move that brings the last marble home ends the game early
        if self.seven_remaining() == 0 || self.state.winning_team().is_some() {
            self.spend(seat, spent);
            self.state.card_active = None;
            self.wild_chosen = false;
            self.seven_backup = None;
            self.end_turn();
        }
        Ok(())
    }

    /// Undo every step of the split move and pass with the card kept.
    fn cancel_seven(&mut self, seat: PlayerId) {
        let remaining = self.seven_remaining();
        if let Some(before) = self.seven_backup.take() {
            debug!(%seat, remaining, "split move rolled back");
            self.state = *before;
        }
        self.state.card_active = None;
        self.wild_chosen = false;
        self.end_turn();
    }

    // =========================================================================
    // Turn and round
    // =========================================================================

    /// Finish the game, or pass to the next seat holding cards, or start a
    /// new round when nobody holds any.
    fn end_turn(&mut self) {
        if let Some(team) = self.state.winning_team() {
            self.state.phase = GamePhase::Finished;
            self.state.card_active = None;
            self.clear_transient();
            info!(?team, round = self.state.round, "game finished");
            return;
        }

        let mut seat = self.state.active_player;
        for _ in 0..PLAYER_COUNT {
            seat = seat.next();
            if !self.state.players[seat].hand.is_empty() || self.state.card_active.is_some() {
                self.state.active_player = seat;
                return;
            }
        }
        self.new_round();
    }

    fn new_round(&mut self) {
        let state = &mut self.state;
        state.round += 1;
        state.starting_player = state.starting_player.next();
        state.active_player = state.starting_player;
        state.card_exchanged = false;
        state.card_active = None;
        self.clear_transient();

        let dealt = deck::deal_round(&mut self.state, &self.config.round_sizes, &mut self.rng);
        info!(
            round = self.state.round,
            starter = %self.state.starting_player,
            dealt,
            "new round"
        );
    }

    // === Checkpoints ===

    /// Encode the whole engine. Unlike `GameState::encode`, a restored
    /// engine also deals the same cards in later rounds.
    pub fn checkpoint(&self) -> Result<Vec<u8>, SnapshotError> {
        let checkpoint = Checkpoint {
            config: self.config.clone(),
            state: self.state.clone(),
            rng: self.rng.state(),
            exchange_buffer: self.exchange_buffer.clone(),
            wild_chosen: self.wild_chosen,
            seven_backup: self.seven_backup.clone(),
            history: self.history.clone(),
        };
        bincode::serialize(&checkpoint).map_err(SnapshotError::Encode)
    }

    /// Rebuild an engine from `checkpoint` output.
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes).map_err(SnapshotError::Decode)?;
        debug!(round = checkpoint.state.round, seed = checkpoint.rng.seed, "engine restored");
        Ok(Self {
            config: checkpoint.config,
            state: checkpoint.state,
            rng: GameRng::from_state(&checkpoint.rng),
            exchange_buffer: checkpoint.exchange_buffer,
            wild_chosen: checkpoint.wild_chosen,
            seven_backup: checkpoint.seven_backup,
            history: checkpoint.history,
        })
    }

    fn clear_transient(&mut self) {
        self.exchange_buffer = PlayerMap::with_default();
        self.wild_chosen = false;
        self.seven_backup = None;
    }
}

impl Default for Dog {
    fn default() -> Self {
        Self::with_rng(GameConfig::default(), GameRng::from_entropy())
    }
}

impl RulesEngine for Dog {
    fn get_state(&self) -> &GameState {
        &self.state
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        self.clear_transient();
        self.wild_chosen = matches!(
            self.state.card_active,
            Some(card) if card.rank.is_concrete() && card.rank != Rank::Seven
        );
    }

    fn get_player_view(&self, player: PlayerId) -> GameState {
        self.state.masked_for(player)
    }

    fn get_list_action(&self) -> Vec<Action> {
        let state = &self.state;
        let seat = state.active_player;

        match self.turn_phase() {
            TurnPhase::Finished => Vec::new(),
            TurnPhase::Exchange => {
                if self.exchange_buffer[seat].is_some() {
                    return Vec::new();
                }
                let mut list = ActionList::new();
                list.extend(state.players[seat].hand.iter().map(|&card| Action::card_only(card)));
                list.into_vec()
            }
            TurnPhase::Normal => movegen::hand_actions(state, seat),
            TurnPhase::WildcardPending => movegen::substitute_choices(state, seat, Card::JOKER),
            TurnPhase::WildcardActive(stand_in) => {
                let mut list = ActionList::new();
                movegen::rank_actions(state, seat, stand_in, &mut list);
                list.into_vec()
            }
            TurnPhase::SevenSequence(card) => {
                movegen::seven_steps(state, seat, card, self.seven_remaining())
            }
        }
    }

    fn apply_action(&mut self, action: Option<&Action>) {
        if let Err(err) = self.try_apply_action(action) {
            debug!(seat = %self.state.active_player, %err, "action rejected");
        }
    }
}

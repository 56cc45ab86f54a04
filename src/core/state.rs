//! Game state: the authoritative snapshot exchanged with clients.
//!
//! ## GameState
//!
//! - Phase, round counter, starting and active seat
//! - Per-seat hand and marbles
//! - Draw and discard piles
//! - Exchange-done flag and the card currently being resolved
//!
//! Engine bookkeeping that is not part of the snapshot (exchange buffer,
//! wild stand-in flag, split-move rollback copy) lives on the engine.
//!
//! Piles use `im` persistent vectors so a full copy for the split-move
//! rollback is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::error::SnapshotError;
use super::player::{PlayerId, PlayerMap, Team, PLAYER_COUNT};
use crate::board::{self, Position};
use crate::cards::Card;

/// A single marble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marble {
    pub position: Position,
    /// Set while the marble sits on its own entry square right after
    /// leaving the kennel. Such a marble cannot be captured or passed.
    pub safe: bool,
}

/// One seat's private data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Card>,
    pub marbles: Vec<Marble>,
}

impl PlayerState {
    /// A seat with an empty hand and all marbles in the kennel.
    #[must_use]
    pub fn new(name: impl Into<String>, seat: PlayerId) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            marbles: board::kennel_squares(seat)
                .map(|position| Marble {
                    position,
                    safe: false,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn has_card(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    /// Remove one copy of `card` from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        if let Some(idx) = self.hand.iter().position(|c| c == card) {
            self.hand.remove(idx);
            true
        } else {
            false
        }
    }
}

/// Coarse game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Running,
    Finished,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player_count: usize,

    pub phase: GamePhase,

    /// Round number (starts at 1).
    pub round: u32,

    /// Has this round's partner exchange happened?
    pub card_exchanged: bool,

    /// Seat that opened the current round.
    pub starting_player: PlayerId,

    /// Seat whose turn it is.
    pub active_player: PlayerId,

    pub players: PlayerMap<PlayerState>,

    /// Front is the top of the pile.
    pub draw_pile: Vector<Card>,

    pub discard_pile: Vector<Card>,

    /// Card being resolved across several actions: a split-move Seven, a
    /// wild card awaiting its stand-in, or the chosen stand-in.
    pub card_active: Option<Card>,
}

impl GameState {
    /// A state with all marbles in their kennels, no cards anywhere,
    /// round 1, seat 0 starting.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player_count: PLAYER_COUNT,
            phase: GamePhase::Running,
            round: 1,
            card_exchanged: false,
            starting_player: PlayerId::new(0),
            active_player: PlayerId::new(0),
            players: PlayerMap::new(|seat| {
                PlayerState::new(config.player_names[seat.index()].clone(), seat)
            }),
            draw_pile: Vector::new(),
            discard_pile: Vector::new(),
            card_active: None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// The active seat's data.
    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.active_player]
    }

    // === Marbles ===

    /// Owner and index of the marble on `pos`, if any.
    #[must_use]
    pub fn marble_at(&self, pos: Position) -> Option<(PlayerId, usize)> {
        self.players.iter().find_map(|(seat, player)| {
            player
                .marbles
                .iter()
                .position(|m| m.position == pos)
                .map(|idx| (seat, idx))
        })
    }

    /// The marble itself on `pos`, if any.
    #[must_use]
    pub fn marble_on(&self, pos: Position) -> Option<(PlayerId, Marble)> {
        self.marble_at(pos)
            .map(|(seat, idx)| (seat, self.players[seat].marbles[idx]))
    }

    /// Is the marble on `pos` a safe marble sitting on its owner's entry
    /// square?
    #[must_use]
    pub fn is_blocking(&self, pos: Position) -> bool {
        matches!(
            self.marble_on(pos),
            Some((owner, marble)) if marble.safe && marble.position == board::entry_square(owner)
        )
    }

    /// Index of one of `seat`'s marbles on `pos`.
    #[must_use]
    pub fn own_marble_at(&self, seat: PlayerId, pos: Position) -> Option<usize> {
        self.players[seat]
            .marbles
            .iter()
            .position(|m| m.position == pos)
    }

    /// Kennel squares of `seat` that hold one of its marbles.
    pub fn kennel_marbles(&self, seat: PlayerId) -> impl Iterator<Item = Position> + '_ {
        self.players[seat]
            .marbles
            .iter()
            .map(|m| m.position)
            .filter(move |&pos| board::is_in_kennel(pos, seat))
    }

    #[must_use]
    pub fn has_marble_in_kennel(&self, seat: PlayerId) -> bool {
        self.kennel_marbles(seat).next().is_some()
    }

    #[must_use]
    pub fn all_in_kennel(&self, seat: PlayerId) -> bool {
        self.players[seat]
            .marbles
            .iter()
            .all(|m| board::is_in_kennel(m.position, seat))
    }

    /// Send a marble back to the lowest free square of its owner's kennel.
    pub fn send_to_kennel(&mut self, seat: PlayerId, idx: usize) {
        let free = board::kennel_squares(seat).find(|&pos| self.marble_at(pos).is_none());
        let marble = &mut self.players[seat].marbles[idx];
        // A marble outside the kennel leaves at least one kennel square free
        if let Some(pos) = free {
            marble.position = pos;
        }
        marble.safe = false;
    }

    // === Win condition ===

    /// Are all of `seat`'s marbles in its home stretch?
    #[must_use]
    pub fn player_home(&self, seat: PlayerId) -> bool {
        self.players[seat]
            .marbles
            .iter()
            .all(|m| board::is_in_home(m.position, seat))
    }

    #[must_use]
    pub fn team_home(&self, team: Team) -> bool {
        team.members().iter().all(|&seat| self.player_home(seat))
    }

    /// The team that has brought all eight marbles home, if any.
    #[must_use]
    pub fn winning_team(&self) -> Option<Team> {
        Team::ALL.into_iter().find(|&team| self.team_home(team))
    }

    // === Cards ===

    /// Cards in both piles and all hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.players.values().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Copy with every other seat's hand replaced by hidden placeholders.
    ///
    /// Once the game is finished nothing is masked.
    #[must_use]
    pub fn masked_for(&self, viewer: PlayerId) -> Self {
        let mut view = self.clone();
        if view.is_finished() {
            return view;
        }
        for (seat, player) in view.players.iter_mut() {
            if seat != viewer {
                player.hand.iter_mut().for_each(|c| *c = Card::HIDDEN);
            }
        }
        view
    }

    // === Snapshots ===

    /// Encode into a compact binary snapshot.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode a snapshot produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn state() -> GameState {
        GameState::new(&GameConfig::default())
    }

    #[test]
    fn test_new_state() {
        let state = state();

        assert_eq!(state.player_count, 4);
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.players[PlayerId::new(1)].name, "Player2");
        for seat in PlayerId::all() {
            assert!(state.all_in_kennel(seat));
            assert_eq!(state.kennel_marbles(seat).count(), 4);
        }
        assert_eq!(state.total_cards(), 0);
    }

    #[test]
    fn test_marble_lookup() {
        let mut state = state();
        state.players[PlayerId::new(2)].marbles[1].position = 40;

        assert_eq!(state.marble_at(40), Some((PlayerId::new(2), 1)));
        assert_eq!(state.marble_at(41), None);
        assert_eq!(state.own_marble_at(PlayerId::new(2), 40), Some(1));
        assert_eq!(state.own_marble_at(PlayerId::new(1), 40), None);
        assert_eq!(state.marble_at(72), Some((PlayerId::new(1), 0)));
    }

    #[test]
    fn test_blocking_requires_entry_square() {
        let mut state = state();
        let p1 = PlayerId::new(1);
        state.players[p1].marbles[0] = Marble { position: 16, safe: true };
        state.players[p1].marbles[1] = Marble { position: 20, safe: false };

        assert!(state.is_blocking(16));
        assert!(!state.is_blocking(20));
        assert!(!state.is_blocking(30));
    }

    #[test]
    fn test_send_to_kennel_uses_free_slot() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.players[p0].marbles[0] = Marble { position: 0, safe: true };
        state.players[p0].marbles[2] = Marble { position: 30, safe: false };

        state.send_to_kennel(p0, 2);
        assert_eq!(state.players[p0].marbles[2], Marble { position: 64, safe: false });

        state.send_to_kennel(p0, 0);
        assert_eq!(state.players[p0].marbles[0], Marble { position: 66, safe: false });
    }

    #[test]
    fn test_winning_team() {
        let mut state = state();
        for seat in Team::Odd.members() {
            for (k, marble) in state.players[seat].marbles.iter_mut().enumerate() {
                marble.position = board::home_start(seat) + k as Position;
            }
        }
        assert_eq!(state.winning_team(), Some(Team::Odd));
        assert!(state.player_home(PlayerId::new(1)));
        assert!(!state.team_home(Team::Even));
    }

    #[test]
    fn test_masked_view() {
        let mut state = state();
        let card = Card::new(Suit::Clubs, Rank::Nine);
        for (_, player) in state.players.iter_mut() {
            player.hand = vec![card, card];
        }

        let view = state.masked_for(PlayerId::new(3));
        assert_eq!(view.players[PlayerId::new(3)].hand, vec![card, card]);
        assert_eq!(view.players[PlayerId::new(0)].hand, vec![Card::HIDDEN, Card::HIDDEN]);

        state.phase = GamePhase::Finished;
        let view = state.masked_for(PlayerId::new(3));
        assert_eq!(view.players[PlayerId::new(0)].hand, vec![card, card]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = state();
        state.draw_pile.push_back(Card::JOKER);
        state.card_active = Some(Card::new(Suit::Spades, Rank::Seven));

        let bytes = state.encode().unwrap();
        let decoded = GameState::decode(&bytes).unwrap();
        assert_eq!(decoded, state);

        assert!(GameState::decode(&bytes[..3]).is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(state()).unwrap();
        assert_eq!(json["phase"], "running");
        assert_eq!(json["players"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["players"][0]["marbles"][0]["position"], 64);
    }
}

//! Player identification, partnerships and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index `0..4`. Seats sit in turn order around the board; seat `i`
//! owns entry square `16·i` and the private squares starting at `64 + 8·i`.
//!
//! ## Team
//!
//! Partners sit opposite each other: seats `{0, 2}` and `{1, 3}`.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table. The board geometry is built around it.
pub const PLAYER_COUNT: usize = 4;

/// Seat identifier.
///
/// Player indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats in turn order.
    ///
    /// ```
    /// use rust_dog::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }

    /// The seat that acts after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// The partner sitting opposite (`0 ↔ 2`, `1 ↔ 3`).
    #[must_use]
    pub const fn partner(self) -> Self {
        Self((self.0 + 2) % PLAYER_COUNT as u8)
    }

    /// The team this seat plays for.
    #[must_use]
    pub const fn team(self) -> Team {
        if self.0 % 2 == 0 {
            Team::Even
        } else {
            Team::Odd
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A partnership of two opposite seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Seats 0 and 2.
    Even,
    /// Seats 1 and 3.
    Odd,
}

impl Team {
    /// Both teams.
    pub const ALL: [Team; 2] = [Team::Even, Team::Odd];

    /// The two seats of this team.
    #[must_use]
    pub const fn members(self) -> [PlayerId; 2] {
        match self {
            Team::Even => [PlayerId(0), PlayerId(2)],
            Team::Odd => [PlayerId(1), PlayerId(3)],
        }
    }

    /// Check if a seat belongs to this team.
    #[must_use]
    pub const fn contains(self, player: PlayerId) -> bool {
        matches!(
            (self, player.0 % 2),
            (Team::Even, 0) | (Team::Odd, 1)
        )
    }
}

/// Per-seat data storage with O(1) access.
///
/// Serializes as a plain list, one entry per seat, so the wire shape of
/// anything holding a `PlayerMap` stays a simple array.
///
/// ## Example
///
/// ```
/// use rust_dog::core::{PlayerId, PlayerMap};
///
/// let mut cards_left: PlayerMap<usize> = PlayerMap::new(|_| 6);
/// cards_left[PlayerId::new(1)] = 5;
///
/// assert_eq!(cards_left[PlayerId::new(0)], 6);
/// assert_eq!(cards_left[PlayerId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p3 = PlayerId::new(3);

        assert_eq!(p0.index(), 0);
        assert_eq!(p3.index(), 3);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(PlayerId::new(0).next(), PlayerId::new(1));
        assert_eq!(PlayerId::new(3).next(), PlayerId::new(0));
    }

    #[test]
    fn test_partners_sit_opposite() {
        assert_eq!(PlayerId::new(0).partner(), PlayerId::new(2));
        assert_eq!(PlayerId::new(1).partner(), PlayerId::new(3));
        assert_eq!(PlayerId::new(2).partner(), PlayerId::new(0));
        assert_eq!(PlayerId::new(3).partner(), PlayerId::new(1));
    }

    #[test]
    fn test_teams() {
        assert_eq!(PlayerId::new(0).team(), Team::Even);
        assert_eq!(PlayerId::new(1).team(), Team::Odd);
        assert_eq!(Team::Even.members(), [PlayerId::new(0), PlayerId::new(2)]);
        assert_eq!(Team::Odd.members(), [PlayerId::new(1), PlayerId::new(3)]);

        for player in PlayerId::all() {
            assert!(player.team().contains(player));
            assert!(player.team().contains(player.partner()));
            assert!(!player.team().contains(player.next()));
        }
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map.player_count(), 4);
        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<Option<u8>> = PlayerMap::with_default();

        map[PlayerId::new(2)] = Some(7);

        assert_eq!(map[PlayerId::new(2)], Some(7));
        assert!(map[PlayerId::new(0)].is_none());
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[1], (PlayerId::new(1), &1));
    }

    #[test]
    fn test_player_map_serializes_as_list() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[1,2,3,4]");

        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}

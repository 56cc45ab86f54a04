//! Action representation: a card plus optional source, destination and
//! stand-in.
//!
//! The same shape covers every kind of play:
//! - Exchange pick: card only
//! - Wild stand-in choice: card + `card_swap`
//! - Entry / move / split step: card + `pos_from` + `pos_to`
//! - Jack swap: card + the two swapped squares
//!
//! "No action" (fold, pass, cancel a split move) is `None` at the engine
//! boundary rather than a variant here.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::Position;
use crate::cards::Card;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use rust_dog::cards::{Card, Rank, Suit};
/// use rust_dog::core::Action;
///
/// let ace = Card::new(Suit::Spades, Rank::Ace);
/// let enter = Action::moving(ace, 64, 0);
/// assert!(enter.is_move());
///
/// let pick = Action::card_only(ace);
/// assert!(!pick.is_move());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The card played (or handed over during the exchange).
    pub card: Card,

    /// Square of the marble being moved, or the first swap square.
    pub pos_from: Option<Position>,

    /// Destination square, or the second swap square.
    pub pos_to: Option<Position>,

    /// Stand-in chosen for a wild card.
    pub card_swap: Option<Card>,
}

impl Action {
    /// An action naming only a card.
    #[must_use]
    pub const fn card_only(card: Card) -> Self {
        Self {
            card,
            pos_from: None,
            pos_to: None,
            card_swap: None,
        }
    }

    /// A marble move (or swap) from one square to another.
    #[must_use]
    pub const fn moving(card: Card, from: Position, to: Position) -> Self {
        Self {
            card,
            pos_from: Some(from),
            pos_to: Some(to),
            card_swap: None,
        }
    }

    /// Choose `stand_in` for the wild card `card`.
    #[must_use]
    pub const fn substitute(card: Card, stand_in: Card) -> Self {
        Self {
            card,
            pos_from: None,
            pos_to: None,
            card_swap: Some(stand_in),
        }
    }

    /// Check if this action moves marbles.
    #[must_use]
    pub const fn is_move(&self) -> bool {
        self.pos_from.is_some() && self.pos_to.is_some()
    }

    /// Source and destination, if both are present.
    #[must_use]
    pub const fn squares(&self) -> Option<(Position, Position)> {
        match (self.pos_from, self.pos_to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.card)?;
        if let Some((from, to)) = self.squares() {
            write!(f, " {from}->{to}")?;
        }
        if let Some(stand_in) = self.card_swap {
            write!(f, " as {stand_in}")?;
        }
        Ok(())
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay/debugging. `action` is `None` for folds, passes and
/// cancelled split moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Option<Action>,

    /// Round in which the action was taken.
    pub round: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Option<Action>, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Hearts, rank)
    }

    #[test]
    fn test_constructors() {
        let pick = Action::card_only(card(Rank::Two));
        assert!(!pick.is_move());
        assert_eq!(pick.squares(), None);

        let step = Action::moving(card(Rank::Five), 3, 8);
        assert!(step.is_move());
        assert_eq!(step.squares(), Some((3, 8)));

        let wild = Action::substitute(Card::JOKER, card(Rank::King));
        assert!(!wild.is_move());
        assert_eq!(wild.card_swap, Some(card(Rank::King)));
    }

    #[test]
    fn test_action_equality_and_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |a: &Action| {
            let mut h = DefaultHasher::new();
            a.hash(&mut h);
            h.finish()
        };

        let a1 = Action::moving(card(Rank::Five), 3, 8);
        let a2 = Action::moving(card(Rank::Five), 3, 8);
        let a3 = Action::moving(card(Rank::Five), 4, 9);

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
        assert_eq!(hash(&a1), hash(&a2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::moving(card(Rank::Five), 3, 8).to_string(), "♥5 3->8");
        assert_eq!(
            Action::substitute(Card::JOKER, card(Rank::Ace)).to_string(),
            "JKR as ♥A"
        );
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            Some(Action::moving(card(Rank::Ace), 72, 16)),
            2,
            3,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(Action::card_only(card(Rank::Two))).unwrap();
        for field in ["card", "pos_from", "pos_to", "card_swap"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}

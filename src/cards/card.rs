//! Card values: suit, rank and the per-rank movement table.
//!
//! Rank is a closed set. Everything the engine needs to know about a rank
//! (step options, whether it can bring a marble out of the kennel) is
//! answered by a `match` here rather than by comparing labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suit.
///
/// Wild cards carry no suit. `Hidden` only appears on the placeholder cards
/// of a masked player view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    Hidden,
}

impl Suit {
    /// The four real suits, in deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Hidden => "X",
        }
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    /// Wild card: stands in for any concrete rank once a stand-in is chosen.
    Joker,
    /// Placeholder rank of a masked card.
    Hidden,
}

impl Rank {
    /// The thirteen concrete ranks, in deck order.
    pub const CONCRETE: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Ranks a wild card may stand in for while the player still has every
    /// marble in the kennel in round one.
    pub const STARTERS: [Rank; 2] = [Rank::Ace, Rank::King];

    /// Step counts a single marble may move with this rank.
    ///
    /// Empty for ranks that don't move a single marble by a fixed amount
    /// (Jack swaps, Seven splits, Joker needs a stand-in first).
    #[must_use]
    pub const fn step_options(self) -> &'static [i32] {
        match self {
            Rank::Ace => &[1, 11],
            Rank::Two => &[2],
            Rank::Three => &[3],
            Rank::Four => &[4, -4],
            Rank::Five => &[5],
            Rank::Six => &[6],
            Rank::Eight => &[8],
            Rank::Nine => &[9],
            Rank::Ten => &[10],
            Rank::Queen => &[12],
            Rank::King => &[13],
            Rank::Seven | Rank::Jack | Rank::Joker | Rank::Hidden => &[],
        }
    }

    /// Can a card of this rank bring a marble out of the kennel?
    #[must_use]
    pub const fn can_enter(self) -> bool {
        matches!(self, Rank::Ace | Rank::King)
    }

    /// True for the thirteen playable ranks (not wild, not masked).
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Rank::Joker | Rank::Hidden)
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "JKR",
            Rank::Hidden => "X",
        }
    }
}

/// An immutable card value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Option<Suit>,
    pub rank: Rank,
}

impl Card {
    /// The opaque card shown in place of another player's hand cards.
    pub const HIDDEN: Card = Card {
        suit: Some(Suit::Hidden),
        rank: Rank::Hidden,
    };

    /// The suitless wild card.
    pub const JOKER: Card = Card {
        suit: None,
        rank: Rank::Joker,
    };

    /// Create a suited card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit: Some(suit),
            rank,
        }
    }

    #[must_use]
    pub const fn is_joker(&self) -> bool {
        matches!(self.rank, Rank::Joker)
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.rank, Rank::Hidden)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(Suit::Hidden) | None => write!(f, "{}", self.rank.label()),
            Some(suit) => write!(f, "{}{}", suit.symbol(), self.rank.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_table() {
        assert_eq!(Rank::Ace.step_options(), &[1, 11]);
        assert_eq!(Rank::Four.step_options(), &[4, -4]);
        assert_eq!(Rank::Ten.step_options(), &[10]);
        assert_eq!(Rank::Queen.step_options(), &[12]);
        assert_eq!(Rank::King.step_options(), &[13]);
        assert!(Rank::Seven.step_options().is_empty());
        assert!(Rank::Jack.step_options().is_empty());
        assert!(Rank::Joker.step_options().is_empty());
    }

    #[test]
    fn test_only_ace_and_king_enter() {
        let entering: Vec<_> = Rank::CONCRETE.iter().filter(|r| r.can_enter()).collect();
        assert_eq!(entering, vec![&Rank::King, &Rank::Ace]);
        assert!(!Rank::Joker.can_enter());
    }

    #[test]
    fn test_concrete() {
        assert!(Rank::CONCRETE.iter().all(|r| r.is_concrete()));
        assert!(!Rank::Joker.is_concrete());
        assert!(!Rank::Hidden.is_concrete());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "♥10");
        assert_eq!(Card::JOKER.to_string(), "JKR");
        assert_eq!(Card::HIDDEN.to_string(), "X");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(Suit::Clubs, Rank::Seven);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}

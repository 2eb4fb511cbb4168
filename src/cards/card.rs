//! Playing card values.
//!
//! A `Card` is an immutable (suit, rank, face) triple. Color is derived
//! from the suit and never stored.

use serde::{Deserialize, Serialize};

/// Lowest rank (Ace).
pub const ACE: u8 = 1;

/// Highest rank (King).
pub const KING: u8 = 13;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Color of this suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// A playing card.
///
/// Equality is by value: two cards with the same suit, rank and face are
/// the same card as far as the rules are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    /// 1 = Ace, 11 = Jack, 12 = Queen, 13 = King.
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    /// Create a face-up card.
    ///
    /// Panics if `rank` is outside `1..=13`.
    #[must_use]
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!((ACE..=KING).contains(&rank), "Rank must be 1-13, got {rank}");
        Self {
            suit,
            rank,
            face_up: true,
        }
    }

    /// Create a face-down card.
    #[must_use]
    pub fn face_down(suit: Suit, rank: u8) -> Self {
        Self {
            face_up: false,
            ..Self::new(suit, rank)
        }
    }

    /// Same card, turned over.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            face_up: !self.face_up,
            ..self
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self.color(), Color::Red)
    }

    /// Rank label: `A`, `2`..`10`, `J`, `Q`, `K`.
    #[must_use]
    pub fn rank_label(self) -> String {
        match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit.symbol())
    }
}

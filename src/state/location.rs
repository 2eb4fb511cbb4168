//! Board locations and move records.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A pile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// A tableau column; cards enter and leave at the tail.
    Tableau(usize),
    /// A single-card holding slot.
    FreeCell(usize),
    /// A foundation pile; only the top card is accessible.
    Foundation(usize),
}

impl Location {
    /// Index within its kind.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Location::Tableau(i) | Location::FreeCell(i) | Location::Foundation(i) => i,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Tableau(i) => write!(f, "tableau {i}"),
            Location::FreeCell(i) => write!(f, "free cell {i}"),
            Location::Foundation(i) => write!(f, "foundation {i}"),
        }
    }
}

/// An accepted move, as recorded in history.
///
/// `card` is the card that was picked up (the head of the run for a
/// multi-card move) and `count` is how many cards travelled with it.
/// Undo takes `count` cards off `to` and puts them back on `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Location,
    pub to: Location,
    pub card: Card,
    pub count: usize,
}

impl Move {
    /// A one-card move.
    #[must_use]
    pub const fn single(from: Location, to: Location, card: Card) -> Self {
        Self { from, to, card, count: 1 }
    }

    /// A run of `count` cards between two tableau columns.
    #[must_use]
    pub const fn run(from_column: usize, to_column: usize, head: Card, count: usize) -> Self {
        Self {
            from: Location::Tableau(from_column),
            to: Location::Tableau(to_column),
            card: head,
            count,
        }
    }

    /// Does this move carry more than one card?
    #[must_use]
    pub const fn is_run(&self) -> bool {
        self.count > 1
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_run() {
            write!(f, "{} (+{}) {} -> {}", self.card, self.count - 1, self.from, self.to)
        } else {
            write!(f, "{} {} -> {}", self.card, self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Tableau(3).to_string(), "tableau 3");
        assert_eq!(Location::FreeCell(0).to_string(), "free cell 0");
        assert_eq!(Location::Foundation(2).to_string(), "foundation 2");
        assert_eq!(Location::FreeCell(1).index(), 1);
    }

    #[test]
    fn test_move_display() {
        let single = Move::single(Location::Tableau(0), Location::FreeCell(1), Card::new(Suit::Spades, 7));
        assert_eq!(single.to_string(), "7♠ tableau 0 -> free cell 1");
        assert!(!single.is_run());

        let run = Move::run(2, 5, Card::new(Suit::Hearts, 12), 3);
        assert_eq!(run.to_string(), "Q♥ (+2) tableau 2 -> tableau 5");
        assert!(run.is_run());
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::run(1, 4, Card::new(Suit::Clubs, 9), 2);
        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}

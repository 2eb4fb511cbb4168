//! Undo history.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::location::Move;

/// Stack of accepted moves, oldest first.
///
/// Backed by a persistent vector so cloning a `GameState` (for hint
/// search or solvers) does not copy the whole history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vector<Move>,
}

impl MoveHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted move.
    pub fn push(&mut self, mv: Move) {
        self.moves.push_back(mv);
    }

    /// Remove and return the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop_back()
    }

    /// Most recent move.
    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.moves.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Moves in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};
    use crate::state::Location;

    fn mv(rank: u8) -> Move {
        Move::single(Location::Tableau(0), Location::FreeCell(0), Card::new(Suit::Hearts, rank))
    }

    #[test]
    fn test_lifo() {
        let mut history = MoveHistory::new();
        history.push(mv(1));
        history.push(mv(2));
        history.push(mv(3));

        assert_eq!(history.len(), 3);
        assert_eq!(history.last(), Some(&mv(3)));
        assert_eq!(history.pop(), Some(mv(3)));
        assert_eq!(history.pop(), Some(mv(2)));
        assert_eq!(history.pop(), Some(mv(1)));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_iter_oldest_first() {
        let mut history = MoveHistory::new();
        history.push(mv(4));
        history.push(mv(5));

        let ranks: Vec<_> = history.iter().map(|m| m.card.rank).collect();
        assert_eq!(ranks, vec![4, 5]);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut history = MoveHistory::new();
        history.push(mv(1));

        let snapshot = history.clone();
        history.push(mv(2));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
    }
}

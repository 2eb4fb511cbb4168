//! Errors raised by the game-state layer.
//!
//! The rules predicates themselves are total and return `bool`; only
//! `GameState` mutations report why a move was refused.

use thiserror::Error;

use crate::cards::Card;
use crate::state::Location;

/// Why a move could not be applied.
///
/// A move that returns an error has not touched the state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Index outside the configured board.
    #[error("{0} does not exist on this board")]
    InvalidLocation(Location),

    /// No card to take from the source.
    #[error("{0} is empty")]
    EmptySource(Location),

    /// Source and destination are the same pile.
    #[error("cannot move {0} onto itself")]
    SameLocation(Location),

    /// The cards from `start` to the tail of the column are not a run.
    #[error("cards from index {start} of column {column} do not form a movable run")]
    NotMovable { column: usize, start: usize },

    /// The destination does not accept the card.
    #[error("{card} cannot be placed on {to}")]
    Rejected { card: Card, to: Location },

    /// Not enough free cells and empty columns to carry the run.
    #[error("run of {len} cards exceeds the {max} movable with current free space")]
    RunTooLong { len: usize, max: usize },

    /// Multi-card moves were requested but the rules forbid them.
    #[error("multi-card moves are disabled")]
    SuperMovesDisabled,

    /// The board violates card conservation, or a snapshot failed to decode.
    #[error("corrupt game state: {0}")]
    Corrupt(String),
}

impl From<bincode::Error> for MoveError {
    fn from(err: bincode::Error) -> Self {
        MoveError::Corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_messages() {
        let err = MoveError::Rejected {
            card: Card::new(Suit::Hearts, 8),
            to: Location::Foundation(0),
        };
        assert_eq!(err.to_string(), "8♥ cannot be placed on foundation 0");

        let err = MoveError::EmptySource(Location::FreeCell(2));
        assert_eq!(err.to_string(), "free cell 2 is empty");

        let err = MoveError::RunTooLong { len: 6, max: 5 };
        assert!(err.to_string().contains("6 cards"));
    }
}

//! FreeCell move legality.
//!
//! The free functions are the rules themselves: pure, total predicates
//! over card slices. `RulesEngine` is the seam `GameState` consults before
//! mutating anything; its provided methods combine the predicates with
//! board lookups and explain refusals through `MoveError`.

use smallvec::SmallVec;

use crate::cards::{Card, ACE};
use crate::core::MoveError;
use crate::state::{GameState, Location, Move};

/// Can the cards from `start` to the tail of `column` move as a unit?
///
/// The card at `start` must be face-up, and every adjacent pair after it
/// must alternate color and descend by exactly one rank. A single face-up
/// tail card always qualifies. Out-of-range `start` is never movable.
#[must_use]
pub fn is_movable_run(column: &[Card], start: usize) -> bool {
    let Some(first) = column.get(start) else {
        return false;
    };
    if !first.face_up {
        return false;
    }

    column[start..]
        .windows(2)
        .all(|pair| pair[0].color() != pair[1].color() && pair[0].rank.checked_sub(1) == Some(pair[1].rank))
}

/// Can `card` be appended to `column`?
///
/// Any card may start an empty column; otherwise the tail must be the
/// opposite color and exactly one rank higher.
#[must_use]
pub fn can_place_on_tableau(card: Card, column: &[Card]) -> bool {
    match column.last() {
        None => true,
        Some(tail) => tail.color() != card.color() && tail.rank.checked_sub(1) == Some(card.rank),
    }
}

/// Can `card` be placed on `pile`?
///
/// Piles are not bound to a suit in advance: an empty pile takes any Ace,
/// and from then on only the next rank of the same suit.
#[must_use]
pub fn can_place_on_foundation(card: Card, pile: &[Card]) -> bool {
    match pile.last() {
        None => card.rank == ACE,
        Some(top) => top.suit == card.suit && card.rank.checked_sub(1) == Some(top.rank),
    }
}

/// Can a free cell holding `cell` take a card?
#[must_use]
pub fn can_place_on_free_cell(cell: Option<Card>) -> bool {
    cell.is_none()
}

/// Longest run that can move between columns in one move.
///
/// Each empty free cell carries one extra card and each empty column
/// doubles the capacity. An empty destination column must not be counted.
#[must_use]
pub fn max_run_length(empty_free_cells: usize, empty_columns: usize) -> usize {
    let doublings = u32::try_from(empty_columns).unwrap_or(u32::MAX);
    (empty_free_cells + 1).saturating_mul(1usize.checked_shl(doublings).unwrap_or(usize::MAX))
}

/// Rules consulted by `GameState`.
///
/// Implementors usually only choose the move policy; the placement rules
/// default to standard FreeCell.
///
/// ## Implementation Notes
///
/// - Every method is read-only: a verdict never changes the board
/// - `check_move` and `check_run` must agree with `legal_moves`
pub trait RulesEngine {
    /// Whether runs of more than one card may move between columns.
    fn allows_super_moves(&self) -> bool;

    fn tableau_accepts(&self, card: Card, column: &[Card]) -> bool {
        can_place_on_tableau(card, column)
    }

    fn foundation_accepts(&self, card: Card, pile: &[Card]) -> bool {
        can_place_on_foundation(card, pile)
    }

    fn free_cell_accepts(&self, cell: Option<Card>) -> bool {
        can_place_on_free_cell(cell)
    }

    fn run_is_movable(&self, column: &[Card], start: usize) -> bool {
        is_movable_run(column, start)
    }

    /// Longest run that may move onto `to_column` in the current position.
    fn max_run_length(&self, state: &GameState, to_column: usize) -> usize {
        if !self.allows_super_moves() {
            return 1;
        }
        let destination_empty = state.column(to_column).is_some_and(<[Card]>::is_empty);
        let empty_columns = state.empty_columns() - usize::from(destination_empty);
        max_run_length(state.empty_free_cells(), empty_columns)
    }

    // === Provided Checks ===

    /// Validate moving the accessible card at `from` to `to`.
    ///
    /// Returns the card that would move.
    fn check_move(&self, state: &GameState, from: Location, to: Location) -> Result<Card, MoveError> {
        if from == to {
            return Err(MoveError::SameLocation(from));
        }
        for location in [from, to] {
            if !state.contains(location) {
                return Err(MoveError::InvalidLocation(location));
            }
        }

        let card = state.card_at(from).ok_or(MoveError::EmptySource(from))?;

        match from {
            Location::Tableau(column) => {
                let cards = state.column(column).unwrap_or_default();
                let tail = cards.len().saturating_sub(1);
                if !self.run_is_movable(cards, tail) {
                    return Err(MoveError::NotMovable { column, start: tail });
                }
            }
            _ if !card.face_up => return Err(MoveError::Rejected { card, to }),
            _ => {}
        }

        let accepted = match to {
            Location::Tableau(column) => self.tableau_accepts(card, state.column(column).unwrap_or_default()),
            Location::FreeCell(cell) => self.free_cell_accepts(state.free_cell(cell).flatten()),
            Location::Foundation(pile) => {
                !matches!(from, Location::Foundation(_))
                    && self.foundation_accepts(card, state.foundation(pile).unwrap_or_default())
            }
        };

        if accepted {
            Ok(card)
        } else {
            Err(MoveError::Rejected { card, to })
        }
    }

    /// Validate moving the run starting at `start` in `from_column` onto
    /// `to_column`.
    ///
    /// Returns the number of cards that would move.
    fn check_run(
        &self,
        state: &GameState,
        from_column: usize,
        start: usize,
        to_column: usize,
    ) -> Result<usize, MoveError> {
        let from = Location::Tableau(from_column);
        let to = Location::Tableau(to_column);

        if from_column == to_column {
            return Err(MoveError::SameLocation(from));
        }
        let source = state.column(from_column).ok_or(MoveError::InvalidLocation(from))?;
        let destination = state.column(to_column).ok_or(MoveError::InvalidLocation(to))?;

        if source.is_empty() {
            return Err(MoveError::EmptySource(from));
        }
        if !self.run_is_movable(source, start) {
            return Err(MoveError::NotMovable { column: from_column, start });
        }

        let len = source.len() - start;
        if len > 1 && !self.allows_super_moves() {
            return Err(MoveError::SuperMovesDisabled);
        }

        let head = source[start];
        if !self.tableau_accepts(head, destination) {
            return Err(MoveError::Rejected { card: head, to });
        }

        let max = self.max_run_length(state, to_column);
        if len > max {
            return Err(MoveError::RunTooLong { len, max });
        }

        Ok(len)
    }

    /// Would `mv` be accepted in the current position?
    fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        if mv.count <= 1 {
            return self.check_move(state, mv.from, mv.to).is_ok_and(|card| card == mv.card);
        }

        let (Location::Tableau(from_column), Location::Tableau(to_column)) = (mv.from, mv.to) else {
            return false;
        };
        let Some(source) = state.column(from_column) else {
            return false;
        };
        let Some(start) = source.len().checked_sub(mv.count) else {
            return false;
        };
        source[start] == mv.card && self.check_run(state, from_column, start, to_column) == Ok(mv.count)
    }

    /// Enumerate every legal move, single cards first, then multi-card runs.
    ///
    /// Moves between two foundations are never listed.
    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        let sources: SmallVec<[Location; 32]> = state.locations().filter(|&l| state.card_at(l).is_some()).collect();
        let destinations: SmallVec<[Location; 32]> = state.locations().collect();

        let mut moves = Vec::new();

        for &from in &sources {
            for &to in &destinations {
                if let Ok(card) = self.check_move(state, from, to) {
                    moves.push(Move::single(from, to, card));
                }
            }
        }

        if self.allows_super_moves() {
            for (from_column, source) in state.tableau().iter().enumerate() {
                for start in 0..source.len().saturating_sub(1) {
                    for to_column in 0..state.tableau().len() {
                        if let Ok(count) = self.check_run(state, from_column, start, to_column) {
                            moves.push(Move::run(from_column, to_column, source[start], count));
                        }
                    }
                }
            }
        }

        moves
    }
}

/// Standard FreeCell rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardRules {
    super_moves: bool,
}

impl Default for StandardRules {
    fn default() -> Self {
        Self { super_moves: true }
    }
}

impl StandardRules {
    /// Standard rules with super-moves enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the tail card of a column may move.
    #[must_use]
    pub fn single_card() -> Self {
        Self { super_moves: false }
    }

    /// Rules matching a board configuration.
    #[must_use]
    pub fn from_config(config: &crate::core::FreeCellConfig) -> Self {
        Self {
            super_moves: config.super_moves,
        }
    }
}

impl RulesEngine for StandardRules {
    fn allows_super_moves(&self) -> bool {
        self.super_moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_tableau_alternating_descending() {
        let red_eight = [card(Suit::Hearts, 8)];
        assert!(can_place_on_tableau(card(Suit::Spades, 7), &red_eight));
        assert!(can_place_on_tableau(card(Suit::Clubs, 7), &red_eight));
        assert!(!can_place_on_tableau(card(Suit::Diamonds, 7), &red_eight));
        assert!(!can_place_on_tableau(card(Suit::Spades, 6), &red_eight));
        assert!(!can_place_on_tableau(card(Suit::Spades, 9), &red_eight));
    }

    #[test]
    fn test_tableau_only_tail_matters() {
        let column = [card(Suit::Clubs, 2), card(Suit::Hearts, 10)];
        assert!(can_place_on_tableau(card(Suit::Spades, 9), &column));
        assert!(!can_place_on_tableau(card(Suit::Hearts, 1), &column));
    }

    #[test]
    fn test_empty_column_takes_anything() {
        assert!(can_place_on_tableau(card(Suit::Hearts, 13), &[]));
        assert!(can_place_on_tableau(card(Suit::Spades, 1), &[]));
    }

    #[test]
    fn test_foundation_builds_up_in_suit() {
        let pile = [card(Suit::Clubs, 1), card(Suit::Clubs, 2)];
        assert!(can_place_on_foundation(card(Suit::Clubs, 3), &pile));
        assert!(!can_place_on_foundation(card(Suit::Clubs, 4), &pile));
        assert!(!can_place_on_foundation(card(Suit::Spades, 3), &pile));
        assert!(!can_place_on_foundation(card(Suit::Clubs, 2), &pile));
    }

    #[test]
    fn test_foundation_any_ace_opens_any_pile() {
        for suit in Suit::ALL {
            assert!(can_place_on_foundation(card(suit, 1), &[]));
            assert!(!can_place_on_foundation(card(suit, 2), &[]));
        }
    }

    #[test]
    fn test_free_cell() {
        assert!(can_place_on_free_cell(None));
        assert!(!can_place_on_free_cell(Some(card(Suit::Hearts, 1))));
    }

    #[test]
    fn test_run_broken_anywhere_is_not_movable() {
        // 9♠ 8♥ 7♣ 7♦: last pair breaks the run
        let column = [
            card(Suit::Spades, 9),
            card(Suit::Hearts, 8),
            card(Suit::Clubs, 7),
            card(Suit::Diamonds, 7),
        ];
        assert!(!is_movable_run(&column, 0));
        assert!(!is_movable_run(&column, 1));
        assert!(!is_movable_run(&column, 2));
        assert!(is_movable_run(&column, 3));
    }

    #[test]
    fn test_run_same_color_breaks() {
        let column = [card(Suit::Hearts, 9), card(Suit::Diamonds, 8)];
        assert!(!is_movable_run(&column, 0));
    }

    #[test]
    fn test_run_out_of_range() {
        let column = [card(Suit::Hearts, 9)];
        assert!(!is_movable_run(&column, 1));
        assert!(!is_movable_run(&[], 0));
    }

    #[test]
    fn test_face_down_tail_not_movable() {
        let column = [Card::face_down(Suit::Hearts, 9)];
        assert!(!is_movable_run(&column, 0));
    }

    #[test]
    fn test_predicates_total_on_out_of_range_ranks() {
        let wild = Card { suit: Suit::Hearts, rank: u8::MAX, face_up: true };
        let blank = Card { suit: Suit::Spades, rank: 0, face_up: true };

        assert!(!can_place_on_tableau(wild, &[card(Suit::Spades, 13)]));
        assert!(!can_place_on_tableau(card(Suit::Hearts, 13), &[blank]));
        assert!(!can_place_on_foundation(card(Suit::Hearts, 1), &[wild]));
        assert!(!can_place_on_foundation(blank, &[card(Suit::Spades, 1)]));
        assert!(!is_movable_run(&[blank, wild], 0));
    }

    #[test]
    fn test_max_run_length() {
        assert_eq!(max_run_length(0, 0), 1);
        assert_eq!(max_run_length(4, 0), 5);
        assert_eq!(max_run_length(4, 1), 10);
        assert_eq!(max_run_length(2, 2), 12);
        assert_eq!(max_run_length(0, 3), 8);
        assert_eq!(max_run_length(1, 200), usize::MAX);
    }

    #[test]
    fn test_standard_rules_policy() {
        assert!(StandardRules::new().allows_super_moves());
        assert!(!StandardRules::single_card().allows_super_moves());

        let config = crate::core::FreeCellConfig::new().with_super_moves(false);
        assert_eq!(StandardRules::from_config(&config), StandardRules::single_card());
    }
}

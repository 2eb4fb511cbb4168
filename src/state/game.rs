//! Game state: the board and its undo history.
//!
//! ## GameState
//!
//! Owns everything the rules read:
//! - Tableau columns
//! - Free cells
//! - Foundation piles
//! - Move history
//!
//! Every mutation goes through a `RulesEngine` verdict first. A refused
//! move returns an error and leaves the board untouched; an accepted move
//! is recorded so `undo` can reverse it exactly.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::history::MoveHistory;
use super::location::{Location, Move};
use crate::cards::{Card, Deck, ACE, DECK_SIZE, KING};
use crate::core::{FreeCellConfig, GameRng, MoveError, FOUNDATION_COUNT};
use crate::rules::RulesEngine;

/// Cards picked up by one move. A run never exceeds 13 cards.
type Hand = SmallVec<[Card; 13]>;

/// A FreeCell board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: FreeCellConfig,
    tableau: Vec<Vec<Card>>,
    free_cells: Vec<Option<Card>>,
    foundations: Vec<Vec<Card>>,
    history: MoveHistory,
    /// Seed of the deal, when dealt from a seed.
    seed: Option<u64>,
}

impl GameState {
    /// Create an empty board shaped by `config`.
    #[must_use]
    pub fn new(config: FreeCellConfig) -> Self {
        Self {
            tableau: vec![Vec::new(); config.tableau_columns],
            free_cells: vec![None; config.free_cells],
            foundations: vec![Vec::new(); FOUNDATION_COUNT],
            history: MoveHistory::new(),
            seed: None,
            config,
        }
    }

    /// Shuffle a fresh deck with `seed` and deal it.
    ///
    /// The same seed and configuration always produce the same layout.
    #[must_use]
    pub fn deal(config: FreeCellConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut state = Self::deal_from(config, Deck::shuffled(&mut rng));
        state.seed = Some(seed);
        state
    }

    /// Deal with a seed drawn from the operating system.
    ///
    /// The seed is kept, so the deal can be replayed with [`GameState::deal`].
    #[must_use]
    pub fn deal_random(config: FreeCellConfig) -> Self {
        Self::deal(config, GameRng::from_entropy().seed())
    }

    /// Deal the undealt cards of `deck` round-robin across the columns.
    ///
    /// With 8 columns and a full deck, the first four columns get 7 cards
    /// and the last four get 6.
    #[must_use]
    pub fn deal_from(config: FreeCellConfig, mut deck: Deck) -> Self {
        let mut state = Self::new(config);
        let columns = state.tableau.len();

        let mut column = 0;
        while let Some(card) = deck.deal_next() {
            state.tableau[column].push(card);
            column = (column + 1) % columns;
        }

        debug!(columns, cards = state.card_count(), "dealt new game");
        state
    }

    /// Build a position directly (puzzles, tests, imported games).
    ///
    /// The shape must match `config`, no card may appear twice, ranks must
    /// be in range, free cells and foundations must hold face-up cards, and
    /// every foundation must build up from an Ace in a single suit.
    pub fn from_parts(
        config: FreeCellConfig,
        tableau: Vec<Vec<Card>>,
        free_cells: Vec<Option<Card>>,
        foundations: Vec<Vec<Card>>,
    ) -> Result<Self, MoveError> {
        let state = Self {
            config,
            tableau,
            free_cells,
            foundations,
            history: MoveHistory::new(),
            seed: None,
        };
        state.validate()?;
        Ok(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &FreeCellConfig {
        &self.config
    }

    /// Seed of the deal, if it was dealt from one.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn tableau(&self) -> &[Vec<Card>] {
        &self.tableau
    }

    /// A tableau column, or `None` if out of range.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[Card]> {
        self.tableau.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn free_cells(&self) -> &[Option<Card>] {
        &self.free_cells
    }

    /// Contents of a free cell; the outer `None` means out of range.
    #[must_use]
    pub fn free_cell(&self, index: usize) -> Option<Option<Card>> {
        self.free_cells.get(index).copied()
    }

    #[must_use]
    pub fn foundations(&self) -> &[Vec<Card>] {
        &self.foundations
    }

    /// A foundation pile, or `None` if out of range.
    #[must_use]
    pub fn foundation(&self, index: usize) -> Option<&[Card]> {
        self.foundations.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Does `location` exist on this board?
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        match location {
            Location::Tableau(i) => i < self.tableau.len(),
            Location::FreeCell(i) => i < self.free_cells.len(),
            Location::Foundation(i) => i < self.foundations.len(),
        }
    }

    /// The accessible card at `location`: a column's tail, a cell's
    /// content, or a foundation's top.
    #[must_use]
    pub fn card_at(&self, location: Location) -> Option<Card> {
        match location {
            Location::Tableau(i) => self.tableau.get(i)?.last().copied(),
            Location::FreeCell(i) => *self.free_cells.get(i)?,
            Location::Foundation(i) => self.foundations.get(i)?.last().copied(),
        }
    }

    /// Every location on the board: columns, then cells, then foundations.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let columns = (0..self.tableau.len()).map(Location::Tableau);
        let cells = (0..self.free_cells.len()).map(Location::FreeCell);
        let piles = (0..self.foundations.len()).map(Location::Foundation);
        columns.chain(cells).chain(piles)
    }

    #[must_use]
    pub fn empty_free_cells(&self) -> usize {
        self.free_cells.iter().filter(|cell| cell.is_none()).count()
    }

    #[must_use]
    pub fn empty_columns(&self) -> usize {
        self.tableau.iter().filter(|column| column.is_empty()).count()
    }

    /// Cards anywhere on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let in_tableau: usize = self.tableau.iter().map(Vec::len).sum();
        let in_cells = self.free_cells.iter().flatten().count();
        let in_foundations: usize = self.foundations.iter().map(Vec::len).sum();
        in_tableau + in_cells + in_foundations
    }

    /// All 52 cards are on the foundations.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundations.iter().map(Vec::len).sum::<usize>() == DECK_SIZE
    }

    // === Moves ===

    /// Move the accessible card at `from` to `to`.
    pub fn apply_move<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &R,
        from: Location,
        to: Location,
    ) -> Result<Move, MoveError> {
        let card = rules.check_move(self, from, to).map_err(|err| {
            trace!(%from, %to, %err, "move rejected");
            err
        })?;

        let mv = Move::single(from, to, card);
        self.execute(mv);
        self.after_move(rules);
        Ok(mv)
    }

    /// Move the run starting at `start` in `from_column` onto `to_column`.
    pub fn apply_run_move<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &R,
        from_column: usize,
        start: usize,
        to_column: usize,
    ) -> Result<Move, MoveError> {
        let count = rules.check_run(self, from_column, start, to_column).map_err(|err| {
            trace!(from_column, start, to_column, %err, "run move rejected");
            err
        })?;

        let mv = Move::run(from_column, to_column, self.tableau[from_column][start], count);
        self.execute(mv);
        self.after_move(rules);
        Ok(mv)
    }

    /// Replay a move produced by `RulesEngine::legal_moves` or taken from
    /// another game's history.
    ///
    /// The card recorded in `mv` must still be the one at the source;
    /// otherwise the move is stale and is rejected.
    pub fn play<R: RulesEngine + ?Sized>(&mut self, rules: &R, mv: &Move) -> Result<Move, MoveError> {
        if !mv.is_run() {
            if let Some(found) = self.card_at(mv.from).filter(|&card| card != mv.card) {
                trace!(expected = %mv.card, %found, from = %mv.from, "stale move rejected");
                return Err(MoveError::Rejected { card: mv.card, to: mv.to });
            }
            return self.apply_move(rules, mv.from, mv.to);
        }
        match (mv.from, mv.to) {
            (Location::Tableau(from_column), Location::Tableau(to_column)) => {
                let len = self.column(from_column).map_or(0, <[Card]>::len);
                let start = len.checked_sub(mv.count).ok_or(MoveError::NotMovable {
                    column: from_column,
                    start: 0,
                })?;
                if self.column(from_column).and_then(|cards| cards.get(start)) != Some(&mv.card) {
                    trace!(expected = %mv.card, from_column, start, "stale run rejected");
                    return Err(MoveError::Rejected { card: mv.card, to: mv.to });
                }
                self.apply_run_move(rules, from_column, start, to_column)
            }
            (from, to) => {
                trace!(%from, %to, "runs only move between columns");
                Err(MoveError::Rejected { card: mv.card, to })
            }
        }
    }

    /// Send every card a foundation accepts to that foundation, until none
    /// is left. Free cells are drained before columns.
    ///
    /// Returns the number of moves made; each is recorded in history.
    pub fn auto_collect<R: RulesEngine + ?Sized>(&mut self, rules: &R) -> usize {
        let mut made = 0;
        while let Some(mv) = self.next_collectable(rules) {
            self.execute(mv);
            made += 1;
        }
        if made > 0 {
            debug!(moves = made, "collected to foundations");
        }
        made
    }

    /// Reverse the most recent move.
    ///
    /// Returns the undone move, or `None` (and changes nothing) when the
    /// history is empty.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        let cards = self.take(mv.to, mv.count);
        self.put(mv.from, cards);
        debug!(%mv, remaining = self.history.len(), "undid move");
        Some(mv)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    // === Integrity ===

    /// Verify that the board holds the full deck, each card exactly once.
    pub fn check_conservation(&self) -> Result<(), MoveError> {
        let count = self.scan_cards()?;
        if count != DECK_SIZE {
            return Err(MoveError::Corrupt(format!("expected {DECK_SIZE} cards, found {count}")));
        }
        Ok(())
    }

    /// Compact binary snapshot, history included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MoveError> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a snapshot written by [`GameState::to_bytes`].
    ///
    /// The board is checked like [`GameState::from_parts`], and the history
    /// must unwind cleanly back to its first move.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MoveError> {
        let state: Self = bincode::deserialize(bytes)?;
        state.validate()?;
        state.check_history()?;
        Ok(state)
    }

    // === Internals ===

    /// Apply an already validated move and record it.
    fn execute(&mut self, mv: Move) {
        let cards = self.take(mv.from, mv.count);
        self.put(mv.to, cards);
        self.history.push(mv);
        debug!(from = %mv.from, to = %mv.to, card = %mv.card, count = mv.count, "move applied");
    }

    fn after_move<R: RulesEngine + ?Sized>(&mut self, rules: &R) {
        if self.config.auto_collect {
            self.auto_collect(rules);
        }
    }

    fn next_collectable<R: RulesEngine + ?Sized>(&self, rules: &R) -> Option<Move> {
        let sources = (0..self.free_cells.len())
            .map(Location::FreeCell)
            .chain((0..self.tableau.len()).map(Location::Tableau));

        for from in sources {
            for pile in 0..self.foundations.len() {
                if let Ok(card) = rules.check_move(self, from, Location::Foundation(pile)) {
                    return Some(Move::single(from, Location::Foundation(pile), card));
                }
            }
        }
        None
    }

    /// Remove `count` cards from the accessible end of `location`.
    fn take(&mut self, location: Location, count: usize) -> Hand {
        match location {
            Location::Tableau(i) => {
                let column = &mut self.tableau[i];
                let start = column.len().saturating_sub(count);
                column.drain(start..).collect()
            }
            Location::FreeCell(i) => self.free_cells[i].take().into_iter().collect(),
            Location::Foundation(i) => self.foundations[i].pop().into_iter().collect(),
        }
    }

    /// Put `cards` back on the accessible end of `location`.
    fn put(&mut self, location: Location, cards: Hand) {
        match location {
            Location::Tableau(i) => self.tableau[i].extend(cards),
            Location::FreeCell(i) => self.free_cells[i] = cards.into_iter().next(),
            Location::Foundation(i) => self.foundations[i].extend(cards),
        }
    }

    fn validate(&self) -> Result<(), MoveError> {
        self.check_shape()?;
        self.check_cards()?;
        self.scan_cards()?;
        Ok(())
    }

    fn check_shape(&self) -> Result<(), MoveError> {
        if self.tableau.len() != self.config.tableau_columns
            || self.free_cells.len() != self.config.free_cells
            || self.foundations.len() != FOUNDATION_COUNT
        {
            return Err(MoveError::Corrupt(format!(
                "board shape {}x{}x{} does not match configuration",
                self.tableau.len(),
                self.free_cells.len(),
                self.foundations.len(),
            )));
        }
        Ok(())
    }

    fn check_cards(&self) -> Result<(), MoveError> {
        let mut all = self
            .tableau
            .iter()
            .flatten()
            .chain(self.free_cells.iter().flatten())
            .chain(self.foundations.iter().flatten());
        if let Some(card) = all.find(|card| !(ACE..=KING).contains(&card.rank)) {
            return Err(MoveError::Corrupt(format!("{:?} card has rank {}", card.suit, card.rank)));
        }

        if let Some(card) = self.free_cells.iter().flatten().find(|card| !card.face_up) {
            return Err(MoveError::Corrupt(format!("{card} is face-down in a free cell")));
        }

        for (index, pile) in self.foundations.iter().enumerate() {
            let Some(base) = pile.first() else {
                continue;
            };
            let ordered = pile
                .iter()
                .zip(ACE..)
                .all(|(card, rank)| card.face_up && card.suit == base.suit && card.rank == rank);
            if !ordered {
                return Err(MoveError::Corrupt(format!(
                    "foundation {index} is not built up from the Ace in one suit"
                )));
            }
        }
        Ok(())
    }

    /// Unwind the history on a copy, failing on the first move that could
    /// not have produced the current board.
    fn check_history(&self) -> Result<(), MoveError> {
        let mut board = self.clone();
        while let Some(mv) = board.history.pop() {
            board.check_undoable(&mv)?;
            let cards = board.take(mv.to, mv.count);
            board.put(mv.from, cards);
        }
        Ok(())
    }

    fn check_undoable(&self, mv: &Move) -> Result<(), MoveError> {
        let corrupt = || MoveError::Corrupt(format!("recorded move {mv} cannot be undone"));

        if mv.count == 0 || mv.from == mv.to || !self.contains(mv.from) || !self.contains(mv.to) {
            return Err(corrupt());
        }

        let moved = match mv.to {
            Location::Tableau(i) => {
                let column = &self.tableau[i];
                column.len().checked_sub(mv.count).map(|start| column[start])
            }
            _ if mv.is_run() => None,
            to => self.card_at(to),
        };
        let source_open = match mv.from {
            Location::Tableau(_) => true,
            Location::FreeCell(i) => !mv.is_run() && self.free_cells[i].is_none(),
            Location::Foundation(_) => !mv.is_run(),
        };

        if moved != Some(mv.card) || !source_open {
            return Err(corrupt());
        }
        Ok(())
    }

    /// Count cards, failing on the first duplicate.
    fn scan_cards(&self) -> Result<usize, MoveError> {
        let all = self
            .tableau
            .iter()
            .flatten()
            .chain(self.free_cells.iter().flatten())
            .chain(self.foundations.iter().flatten());

        let mut seen = FxHashSet::default();
        for card in all {
            if !seen.insert((card.suit, card.rank)) {
                return Err(MoveError::Corrupt(format!("{card} appears more than once")));
            }
        }
        Ok(seen.len())
    }
}

//! The 52-card deck and its deal cursor.
//!
//! A `Deck` holds all 52 cards in a fixed order plus a cursor marking how
//! many have been dealt. Dealing never removes cards, so the dealt prefix
//! and the remaining suffix always partition the full set.

use serde::{Deserialize, Serialize};

use super::card::{Card, Suit, ACE, KING};
use crate::core::{GameRng, MoveError};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Every (suit, rank) pair exactly once, face-up, in canonical order.
#[must_use]
pub fn create_standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (ACE..=KING).map(move |rank| Card::new(suit, rank)))
        .collect()
}

/// A deck with a deal cursor.
///
/// ## Usage
///
/// ```
/// use freecell_rules::cards::Deck;
/// use freecell_rules::core::GameRng;
///
/// let mut deck = Deck::shuffled(&mut GameRng::new(1));
/// let mut dealt = 0;
/// while deck.deal_next().is_some() {
///     dealt += 1;
/// }
/// assert_eq!(dealt, 52);
/// assert_eq!(deck.remaining(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckRecord")]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

/// Unchecked wire form of a `Deck`.
#[derive(Deserialize)]
struct DeckRecord {
    cards: Vec<Card>,
    cursor: usize,
}

impl TryFrom<DeckRecord> for Deck {
    type Error = MoveError;

    fn try_from(record: DeckRecord) -> Result<Self, MoveError> {
        if record.cursor > record.cards.len() {
            return Err(MoveError::Corrupt(format!(
                "deck cursor {} past {} cards",
                record.cursor,
                record.cards.len()
            )));
        }
        let mut deck = Self::from_order(record.cards)
            .ok_or_else(|| MoveError::Corrupt("deck is not the 52-card set".to_string()))?;
        deck.cursor = record.cursor;
        Ok(deck)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deck {
    /// Unshuffled deck in canonical order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            cards: create_standard_deck(),
            cursor: 0,
        }
    }

    /// A freshly shuffled deck.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// Build a deck in an explicit order (deal layouts, tests).
    ///
    /// Returns `None` unless `cards` is exactly the 52-card set.
    #[must_use]
    pub fn from_order(cards: Vec<Card>) -> Option<Self> {
        if cards.iter().any(|c| !(ACE..=KING).contains(&c.rank)) {
            return None;
        }
        let mut sorted = cards.clone();
        sorted.sort_by_key(|c| (c.suit, c.rank));
        sorted.dedup_by_key(|c| (c.suit, c.rank));
        if cards.len() != DECK_SIZE || sorted.len() != DECK_SIZE {
            return None;
        }
        Some(Self { cards, cursor: 0 })
    }

    /// Shuffle all 52 cards and rewind the cursor.
    ///
    /// Cards already dealt are shuffled back in.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        self.cursor = 0;
    }

    /// Deal the next card, or `None` once all cards have been dealt.
    pub fn deal_next(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Cards not yet dealt.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Rewind the cursor without reshuffling.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Cards already dealt, in deal order.
    #[must_use]
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }

    /// Full deck order, dealt and undealt.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Iterator for Deck {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        self.deal_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

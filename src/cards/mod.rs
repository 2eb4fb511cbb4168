//! Card system: card values and the 52-card deck.
//!
//! ## Key Types
//!
//! - `Suit`, `Color`: suit and derived color
//! - `Card`: immutable (suit, rank, face) value
//! - `Deck`: shuffled deck with a deal cursor

pub mod card;
pub mod deck;

pub use card::{Card, Color, Suit, ACE, KING};
pub use deck::{create_standard_deck, Deck, DECK_SIZE};

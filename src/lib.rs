//! # freecell-rules
//!
//! A FreeCell rules engine with no UI attached.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: Legality checks are free functions over card slices.
//!    They never store or mutate state.
//!
//! 2. **Explicit state**: The board lives in one caller-owned `GameState`.
//!    It mutates only after a `RulesEngine` verdict and records every
//!    accepted move for undo.
//!
//! 3. **Reproducible deals**: Decks are shuffled by a seeded ChaCha RNG, so a
//!    seed identifies a deal.
//!
//! ## Example
//!
//! ```
//! use freecell_rules::{FreeCellConfig, GameState, Location, RulesEngine, StandardRules};
//!
//! let rules = StandardRules::new();
//! let mut game = GameState::deal(FreeCellConfig::default(), 1);
//!
//! game.apply_move(&rules, Location::Tableau(0), Location::FreeCell(0)).unwrap();
//! assert_eq!(game.history().len(), 1);
//!
//! game.undo();
//! assert!(game.history().is_empty());
//! assert!(!rules.legal_moves(&game).is_empty());
//! ```
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Cards and the 52-card deck
//! - `rules`: Move legality predicates and the `RulesEngine` trait
//! - `state`: Board locations, move history, game state

pub mod core;
pub mod cards;
pub mod rules;
pub mod state;

// Re-export commonly used types
pub use crate::core::{FreeCellConfig, GameRng, MoveError};

pub use crate::cards::{create_standard_deck, Card, Color, Deck, Suit};

pub use crate::rules::{
    can_place_on_foundation, can_place_on_free_cell, can_place_on_tableau, is_movable_run, RulesEngine,
    StandardRules,
};

pub use crate::state::{GameState, Location, Move, MoveHistory};
